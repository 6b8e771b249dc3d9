// 3.0: external observations attached to a tick. the engine does not trade on
// them; they ride along into diagnostics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionObservation {
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    pub transport_fees: Decimal,
    pub export_tariff: Decimal,
    pub import_tariff: Decimal,
    pub sugar_price: Decimal,
    pub sunlight_index: Decimal,
}

impl ConversionObservation {
    /// Numeric fields in their fixed diagnostic order.
    pub fn fields(&self) -> [Decimal; 7] {
        [
            self.bid_price,
            self.ask_price,
            self.transport_fees,
            self.export_tariff,
            self.import_tariff,
            self.sugar_price,
            self.sunlight_index,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Free-form numeric values, passed through untouched.
    pub plain_value_observations: BTreeMap<String, i64>,
    pub conversion_observations: BTreeMap<String, ConversionObservation>,
}
