use histfetch::HistoricalConnector;
use std::sync::Arc;

/// The Alpaca connector from `APCA_*` variables, or the static mock when
/// `HISTFETCH_EXAMPLES_USE_MOCK` is set.
pub fn get_connector() -> Result<Arc<dyn HistoricalConnector>, Box<dyn std::error::Error>> {
    if std::env::var("HISTFETCH_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Ok(Arc::new(histfetch_mock::MockConnector::new()))
    } else {
        Ok(Arc::new(histfetch_alpaca::AlpacaConnector::from_env()?))
    }
}
