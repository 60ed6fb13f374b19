// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::model::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_set_duration_selects_whole_clip() {
        let mut range = ClipTimeRange::default();
        assert!(range.set_duration(120.0));
        assert_eq!(range.duration, 120.0);
        assert_eq!(range.start, 0.0);
        assert_eq!(range.end, 120.0);
        assert_eq!(range.playhead, 0.0);
    }

    #[test]
    fn test_set_duration_rejects_malformed() {
        let mut range = ClipTimeRange::with_duration(30.0);
        assert!(!range.set_duration(f64::NAN));
        assert!(!range.set_duration(f64::INFINITY));
        assert!(!range.set_duration(-1.0));
        assert_eq!(range, ClipTimeRange::with_duration(30.0));
    }

    #[test]
    fn test_set_duration_idempotent() {
        let mut once = ClipTimeRange::default();
        once.set_duration(42.5);
        let mut twice = once;
        twice.set_duration(42.5);
        assert_eq!((once.start, once.end), (twice.start, twice.end));
    }

    #[test]
    fn test_end_clamps_after_start() {
        let mut range = ClipTimeRange::with_duration(120.0);
        range.set_start(10.0);
        range.set_end(5.0);
        assert!(approx(range.end, 10.1));
        assert!(range.start < range.end);
    }

    #[test]
    fn test_end_clamps_to_duration() {
        let mut range = ClipTimeRange::with_duration(60.0);
        range.set_end(90.0);
        assert_eq!(range.end, 60.0);
    }

    #[test]
    fn test_start_clamps_before_end() {
        let mut range = ClipTimeRange::with_duration(60.0);
        range.set_end(20.0);
        range.set_start(25.0);
        assert!(approx(range.start, 19.9));
        range.set_start(-4.0);
        assert_eq!(range.start, 0.0);
    }

    #[test]
    fn test_start_without_end_opens_default_window() {
        let mut range = ClipTimeRange::default();
        range.set_start(5.0);
        assert_eq!(range.start, 5.0);
        assert_eq!(range.end, 6.0);
    }

    #[test]
    fn test_default_window_respects_duration() {
        let mut range = ClipTimeRange {
            duration: 5.5,
            ..Default::default()
        };
        range.set_start(5.0);
        assert_eq!(range.end, 5.5);
        assert!(range.end - range.start >= MIN_SELECTION - 1e-9);
    }

    #[test]
    fn test_playhead_stays_inside_selection() {
        let mut range = ClipTimeRange::with_duration(100.0);
        range.set_start(10.0);
        range.set_end(20.0);
        range.set_playhead(50.0);
        assert_eq!(range.playhead, 20.0);
        range.set_playhead(1.0);
        assert_eq!(range.playhead, 10.0);
    }

    #[test]
    fn test_bound_changes_pull_playhead_along() {
        let mut range = ClipTimeRange::with_duration(100.0);
        range.set_playhead(5.0);
        range.set_start(30.0);
        assert_eq!(range.playhead, 30.0);
    }

    #[test]
    fn test_non_finite_input_ignored() {
        let mut range = ClipTimeRange::with_duration(10.0);
        assert!(!range.set_start(f64::NAN));
        assert!(!range.set_end(f64::NEG_INFINITY));
        assert!(!range.set_playhead(f64::NAN));
        assert_eq!(range, ClipTimeRange::with_duration(10.0));
    }

    #[test]
    fn test_aspect_preset_parse_and_display() {
        for preset in AspectPreset::ALL {
            let parsed: AspectPreset = preset.as_str().parse().unwrap();
            assert_eq!(parsed, preset);
            assert_eq!(preset.to_string(), preset.as_str());
        }
        assert!("4:3".parse::<AspectPreset>().is_err());
        assert!(AspectPreset::default().is_native());
        assert_eq!(AspectPreset::Portrait.label(), "3:4 (Portrait)");
    }

    #[test]
    fn test_trim_request_wire_format() {
        let request = TrimRequest {
            source_url: "https://cdn.example/v.mp4".to_string(),
            start_time: 1.5,
            end_time: 4.0,
            owner_id: "u1".to_string(),
            name: "holiday".to_string(),
            aspect_ratio: AspectPreset::Vertical,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["sourceUrl"], "https://cdn.example/v.mp4");
        assert_eq!(json["startTime"], 1.5);
        assert_eq!(json["ownerId"], "u1");
        assert_eq!(json["aspectRatio"], "9:16");
    }

    #[test]
    fn test_trim_response_without_error_field() {
        let response: TrimResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(response, TrimResponse::ok());
    }

    #[test]
    fn test_download_name() {
        let mut clip = ClipRecord {
            id: "a".to_string(),
            url: "u".to_string(),
            name: "beach".to_string(),
            owner_id: None,
            aspect_ratio: None,
        };
        assert_eq!(clip.download_name(), "beach.mp4");
        clip.name = "beach.mp4".to_string();
        assert_eq!(clip.download_name(), "beach.mp4");
        clip.name.clear();
        assert_eq!(clip.download_name(), "video.mp4");
    }
}
