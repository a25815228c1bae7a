//! Raw-count calibration maths
//!
//! Coefficients from the Sensirion SHT1x datasheet for the 14-bit
//! temperature and 12-bit humidity readouts at 5 V supply. All conversions
//! are pure and never clamp: the display decides what to do with values
//! outside the physical range, and the query protocol reports them as-is.

/// Degrees Celsius per temperature count.
const CELSIUS_SLOPE: f32 = 0.01;
/// Celsius reading at zero counts.
const CELSIUS_OFFSET: f32 = -40.0;

/// Degrees Fahrenheit per temperature count.
const FAHRENHEIT_SLOPE: f32 = 0.018;
/// Fahrenheit reading at zero counts.
const FAHRENHEIT_OFFSET: f32 = -40.0;

/// Humidity curve, rh = C1 + C2*count + C3*count^2.
const HUMIDITY_C1: f32 = -2.0468;
const HUMIDITY_C2: f32 = 0.0367;
const HUMIDITY_C3: f32 = -1.5955e-6;

/// Temperature compensation of the humidity curve,
/// (t - 25 degC) * (T1 + T2*count).
const HUMIDITY_T1: f32 = 0.01;
const HUMIDITY_T2: f32 = 8.0e-5;

/// Lowest temperature the sensor can report, in degrees Celsius.
pub const MIN_TEMPERATURE_C: f32 = -40.0;
/// Highest temperature the sensor can report, in degrees Celsius.
pub const MAX_TEMPERATURE_C: f32 = 123.8;
/// Lowest physical relative humidity, percent.
pub const MIN_HUMIDITY_PCT: f32 = 0.0;
/// Highest physical relative humidity, percent.
pub const MAX_HUMIDITY_PCT: f32 = 100.0;

/// Temperature in degrees Celsius from a raw 14-bit count.
pub fn celsius(raw: u16) -> f32 {
    f32::from(raw) * CELSIUS_SLOPE + CELSIUS_OFFSET
}

/// Temperature in degrees Fahrenheit from a raw 14-bit count.
///
/// Uses its own datasheet coefficients rather than rescaling [`celsius`];
/// the two stay consistent within f32 tolerance.
pub fn fahrenheit(raw: u16) -> f32 {
    f32::from(raw) * FAHRENHEIT_SLOPE + FAHRENHEIT_OFFSET
}

/// Temperature-compensated relative humidity in percent.
///
/// Takes the raw 12-bit humidity count together with the channel's last raw
/// temperature count; the compensation term corrects the curve away from
/// the 25 degC reference.
pub fn humidity(raw_humidity: u16, raw_temperature: u16) -> f32 {
    let count = f32::from(raw_humidity);
    let linear = HUMIDITY_C1 + HUMIDITY_C2 * count + HUMIDITY_C3 * count * count;
    (celsius(raw_temperature) - 25.0) * (HUMIDITY_T1 + HUMIDITY_T2 * count) + linear
}
