use super::*;

#[test]
fn itinerary_id_keeps_value() {
    assert_eq!(itinerary_id(Some("trip-42".into())), Some("trip-42".to_owned()));
}

#[test]
fn itinerary_id_rejects_missing_or_blank() {
    assert_eq!(itinerary_id(None), None);
    assert_eq!(itinerary_id(Some("  ".into())), None);
}
