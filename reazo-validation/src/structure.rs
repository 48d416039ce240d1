// Shape checks for location objects

use serde_json::Value;

/// Whether every path resolves to a non-null value.
fn has_all(value: &Value, pointers: &[&str]) -> bool {
    value.is_object()
        && pointers
            .iter()
            .all(|p| value.pointer(p).is_some_and(|v| !v.is_null()))
}

/// Google Places `PlaceResult`: an address and a `geometry.location` with
/// `lat` and `lng`.
pub fn is_google_place_result(value: &Value) -> bool {
    has_all(
        value,
        &[
            "/formatted_address",
            "/geometry/location/lat",
            "/geometry/location/lng",
        ],
    )
}

/// Script location: an address and a `point` with `lat` and `lon`.
pub fn is_script_location(value: &Value) -> bool {
    has_all(value, &["/formatted_address", "/point/lat", "/point/lon"])
}
