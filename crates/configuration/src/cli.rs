use crate::settings::Config;
use clap::Args;
use std::path::PathBuf;

/// Command-line flags that patch the loaded configuration.
///
/// Every flag is optional; anything left out keeps the value from the file or
/// the environment.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// First asset to compare (e.g., "BTC-USD").
    #[arg(long)]
    pub primary: Option<String>,

    /// Second asset to compare (e.g., "^GSPC").
    #[arg(long)]
    pub secondary: Option<String>,

    /// Years of history to analyse (1-10).
    #[arg(long)]
    pub years: Option<u32>,

    /// Rolling correlation window, in trading days.
    #[arg(long)]
    pub window: Option<usize>,

    /// Annual risk-free rate for the Sharpe ratio (0.04 = 4%).
    #[arg(long)]
    pub risk_free_rate: Option<f64>,

    /// Directory holding `<ASSET>.csv` price files.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Applies the flags that were given. The caller re-validates afterwards.
    pub fn apply(&self, config: &mut Config) {
        if let Some(primary) = &self.primary {
            config.dashboard.primary_asset = primary.clone();
        }
        if let Some(secondary) = &self.secondary {
            config.dashboard.secondary_asset = secondary.clone();
        }
        if let Some(years) = self.years {
            config.dashboard.years = years;
        }
        if let Some(window) = self.window {
            config.analytics.rolling_window = window;
        }
        if let Some(rate) = self.risk_free_rate {
            config.analytics.risk_free_rate = rate;
        }
        if let Some(dir) = &self.data_dir {
            config.data.directory = dir.clone();
        }
    }
}
