use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum VendingError {
    #[error("This coin is not supported: {0}")]
    #[diagnostic(
        code(vending::invalid_coin),
        help("accepted coins are 1, 2, 5 and 10")
    )]
    InvalidCoin(u32),

    #[error("Product out of stock: {0}")]
    #[diagnostic(
        code(vending::product_unavailable),
        help("pick another product from the catalog")
    )]
    ProductUnavailable(String),

    #[error("Select a product first")]
    #[diagnostic(code(vending::nothing_selected))]
    NothingSelected,

    #[error("There is no coins for change")]
    #[diagnostic(
        code(vending::insufficient_change),
        help("insert more coins, cancel, or pick another product")
    )]
    InsufficientChangeAvailable,

    #[error("Too many coins of denomination {0}")]
    #[diagnostic(
        code(vending::coin_overflow),
        help("empty the coin box before adding more of this denomination")
    )]
    CoinOverflow(u32),

    #[error("Malformed session event: {0}")]
    #[diagnostic(code(vending::malformed_event))]
    MalformedEvent(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(vending::config))]
    Config(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VendingError>;
