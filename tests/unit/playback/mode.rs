use super::*;

#[test]
fn mode_string_conversion_roundtrips_names() {
    for mode in [PlaybackMode::RealTime, PlaybackMode::EveryFrame] {
        assert_eq!(mode.to_string().parse::<PlaybackMode>().unwrap(), mode);
    }
    assert_eq!(
        "every-frame".parse::<PlaybackMode>().unwrap(),
        PlaybackMode::EveryFrame
    );
    assert_eq!(
        "real_time".parse::<PlaybackMode>().unwrap(),
        PlaybackMode::RealTime
    );
    assert!("slow-mo".parse::<PlaybackMode>().is_err());
}

#[test]
fn mode_serde_uses_kebab_case() {
    let json = serde_json::to_string(&PlaybackMode::EveryFrame).unwrap();
    assert_eq!(json, "\"every-frame\"");
    let back: PlaybackMode = serde_json::from_str("\"real-time\"").unwrap();
    assert_eq!(back, PlaybackMode::RealTime);
}
