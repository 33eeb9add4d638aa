//! Stock Feature Encoder
//!
//! The deployed model expects 3-period moving averages of outbound/inbound
//! (`keluar_ma3`, `masuk_ma3`). By default the current period stands in for
//! them (`use_single_period_proxy`); with the proxy off they are averaged
//! over the current period and up to two `recent_periods`.

use serde::{Deserialize, Serialize};

use super::Features;
use crate::logic::decision::rules::EMPTY_STOCK_DEPLETION_RATE;

/// Periods in the moving average, current one included
const MOVING_AVERAGE_WINDOW: usize = 3;

/// Inbound/outbound of one past period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodMovement {
    pub inbound: u32,
    pub outbound: u32,
}

/// Raw stock input as collected by the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockObservation {
    pub item_name: String,
    pub opening_stock: u32,
    pub inbound: u32,
    pub outbound: u32,
    /// Free text (Ekor, Sachet, Kg, ...)
    pub unit: String,
    /// 1-12
    pub month: u8,
    /// Previous periods, oldest first
    #[serde(default)]
    pub recent_periods: Vec<PeriodMovement>,
}

impl StockObservation {
    /// inbound - outbound
    pub fn movement(&self) -> i64 {
        i64::from(self.inbound) - i64::from(self.outbound)
    }

    /// outbound / opening stock, 1.0 when there is no opening stock
    pub fn depletion_rate(&self) -> f32 {
        if self.opening_stock > 0 {
            self.outbound as f32 / self.opening_stock as f32
        } else {
            EMPTY_STOCK_DEPLETION_RATE
        }
    }

    /// opening + inbound - outbound
    pub fn closing_stock(&self) -> i64 {
        i64::from(self.opening_stock) + self.movement()
    }
}

/// Encoding switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEncoding {
    /// Use this period's inbound/outbound in place of the moving averages
    pub use_single_period_proxy: bool,
}

impl Default for StockEncoding {
    fn default() -> Self {
        Self {
            use_single_period_proxy: true,
        }
    }
}

/// Encoder output plus derived values echoed in the prediction
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedStock {
    pub features: Features,
    pub movement: i64,
    pub depletion_rate: f32,
}

/// Build `[opening, inbound, outbound, movement, outbound_ma3, inbound_ma3,
/// depletion_rate, month]`
pub fn encode_stock(observation: &StockObservation, encoding: &StockEncoding) -> EncodedStock {
    if !(1..=12).contains(&observation.month) {
        log::warn!(
            "month {} for {:?} is outside 1-12; encoding as given",
            observation.month,
            observation.item_name
        );
    }

    let (outbound_ma, inbound_ma) = if encoding.use_single_period_proxy {
        (observation.outbound as f32, observation.inbound as f32)
    } else {
        moving_averages(observation)
    };

    let movement = observation.movement();
    let depletion_rate = observation.depletion_rate();

    let features = [
        observation.opening_stock as f32,
        observation.inbound as f32,
        observation.outbound as f32,
        movement as f32,
        outbound_ma,
        inbound_ma,
        depletion_rate,
        f32::from(observation.month),
    ];

    EncodedStock {
        features,
        movement,
        depletion_rate,
    }
}

/// (outbound, inbound) means over the current period and its recent history
fn moving_averages(observation: &StockObservation) -> (f32, f32) {
    let history = &observation.recent_periods;
    let take = history.len().min(MOVING_AVERAGE_WINDOW - 1);
    let window = &history[history.len() - take..];

    let count = (window.len() + 1) as f32;
    let outbound: u64 = window.iter().map(|p| u64::from(p.outbound)).sum::<u64>()
        + u64::from(observation.outbound);
    let inbound: u64 = window.iter().map(|p| u64::from(p.inbound)).sum::<u64>()
        + u64::from(observation.inbound);

    (outbound as f32 / count, inbound as f32 / count)
}
