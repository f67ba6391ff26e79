use thiserror::Error;

/// Rejections raised while parsing listing parameters. Each variant carries
/// the exact message returned to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("`before` or `after` is missing")]
    MissingCursorBound,

    #[error("Invalid `before` timestamp")]
    InvalidBefore,

    #[error("Invalid `after` timestamp")]
    InvalidAfter,

    #[error("`before` is later than `after`")]
    BeforeLaterThanAfter,

    #[error("Invalid poster id")]
    InvalidPosterId,

    #[error("Invalid member id")]
    InvalidMemberId,

    #[error("Invalid radius")]
    InvalidRadius,

    #[error("Invalid lat/lng")]
    InvalidLatLng,

    #[error("Invalid page size")]
    InvalidPageSize,

    #[error("`searchText` is required")]
    MissingSearchText,
}
