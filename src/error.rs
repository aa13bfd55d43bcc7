#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("End of URL not found")]
    UrlTerminatorNotFound,
    #[error("Description not found")]
    DescriptionMarkerNotFound,
    #[error("End of description not found")]
    DescriptionEndNotFound,
    #[error("Employer not found")]
    EmployerMarkerNotFound,
    #[error("End of employer not found")]
    EmployerEndNotFound,
    #[error("End date not found")]
    DeadlineMarkerNotFound,
    #[error("End of end date not found")]
    DeadlineEndNotFound,
    #[error("Invalid end date '{raw}' (error: '{source}')")]
    InvalidDate {
        raw: String,
        source: chrono::ParseError,
    },
    #[error("End date '{0}' has no local midnight in the configured time zone")]
    NonexistentLocalTime(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Results not found")]
    ResultsNotFound,
    #[error("End of the results not found")]
    ResultsEndNotFound,
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown time zone '{0}'")]
    InvalidTimeZone(String),
}
