//! Perceived temperature

/// At or above this temperature (°F) the heat index is what people feel,
/// below it the wind chill.
pub const HEAT_INDEX_THRESHOLD_F: f32 = 50.0;

/// Pick the perceived temperature for a reading.
///
/// Missing inputs never fail: an unavailable temperature, or an unavailable
/// heat index / wind chill on the selected side, yields `None`.
#[must_use]
pub fn compute(temp: Option<f32>, heat_index: Option<f32>, wind_chill: Option<f32>) -> Option<f32> {
    let temp = temp?;
    if temp >= HEAT_INDEX_THRESHOLD_F {
        heat_index
    } else {
        wind_chill
    }
}
