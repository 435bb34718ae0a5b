use super::*;
use crate::animation::ease::TimingFunction;

fn track(key: PropertyKey, begin: f64) -> Interpolation {
    Interpolation {
        key,
        from: AnimValue::Scalar(1.0),
        to: AnimValue::Scalar(0.0),
        curve: Curve::Timing(TimingFunction::Standard),
        arc_control: None,
        begin_time: begin,
        duration: 0.3,
        paused_at: None,
        reversed: false,
    }
}

#[test]
fn clones_share_one_log() {
    let log = ScheduleLog::new();
    let mut writer = log.clone();
    writer.scheduled(NodeId(3), &track(PropertyKey::Opacity, 0.0));
    writer.scheduled(NodeId(3), &track(PropertyKey::CornerRadius, 0.0));
    writer.scheduled(NodeId(4), &track(PropertyKey::Opacity, 0.5));

    assert_eq!(log.len(), 3);
    let opacity = log.for_key(NodeId(3), PropertyKey::Opacity);
    assert_eq!(opacity.len(), 1);
    assert_eq!(opacity[0].duration, 0.3);
    assert_eq!(log.for_key(NodeId(4), PropertyKey::Opacity)[0].begin_time, 0.5);

    log.clear();
    assert!(writer.is_empty());
}

#[test]
fn entries_serialize_without_empty_arc() {
    let mut log = ScheduleLog::new();
    log.scheduled(NodeId(1), &track(PropertyKey::Opacity, 0.0));
    let json = serde_json::to_value(log.entries()).unwrap();

    assert_eq!(json[0]["key"], "opacity");
    assert_eq!(json[0]["node"], 1);
    assert!(json[0].get("arc_control").is_none());
}
