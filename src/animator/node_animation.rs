use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::animation::ease::TimingFunction;
use crate::animation::track::{Curve, Interpolation, arc_control_point};
use crate::animation::value::{AnimValue, PropertyKey};
use crate::animator::timing::{Geometry, default_timing, optimized_duration};
use crate::context::proxy::RenderProxy;
use crate::foundation::core::{NodeId, Point, Rect, Size};
use crate::foundation::math::Transform3D;
use crate::modifier::state::{DurationSpec, TargetState};

// Keep seeks strictly inside a track so the paused value is never the settled one.
const SEEK_EPSILON: f64 = 0.001;

/// Per-node bookkeeping of the default animator.
///
/// `state` holds the (from, to) pair of every animated key; `tracks` the interpolation currently
/// driving each key.
#[derive(Clone, Debug)]
pub(crate) struct NodeAnimation {
    pub(crate) node: NodeId,
    pub(crate) appearing: bool,
    pub(crate) target: TargetState,
    pub(crate) duration: f64,
    pub(crate) timing: TimingFunction,
    pub(crate) state: BTreeMap<PropertyKey, (AnimValue, AnimValue)>,
    pub(crate) tracks: BTreeMap<PropertyKey, Interpolation>,
    scheduled: Vec<Interpolation>,
}

impl NodeAnimation {
    pub(crate) fn new(node: NodeId, appearing: bool, target: TargetState) -> Self {
        Self {
            node,
            appearing,
            target,
            duration: 0.0,
            timing: TimingFunction::Standard,
            state: BTreeMap::new(),
            tracks: BTreeMap::new(),
            scheduled: Vec::new(),
        }
    }

    /// Automatic duration from the proxy's current geometry to the target geometry.
    pub(crate) fn optimized_duration(&self, proxy: &RenderProxy) -> f64 {
        let from = Geometry {
            position: proxy
                .value(PropertyKey::Position)
                .and_then(|v| v.as_point())
                .unwrap_or(Point::ZERO),
            size: proxy
                .value(PropertyKey::Size)
                .and_then(|v| v.as_size())
                .unwrap_or(Size::ZERO),
            transform: proxy
                .value(PropertyKey::Transform)
                .and_then(|v| v.as_transform())
                .unwrap_or(Transform3D::IDENTITY),
        };
        let to = Geometry {
            position: self.target.position.unwrap_or(from.position),
            size: self.target.size.unwrap_or(from.size),
            transform: self.target.transform.unwrap_or(from.transform),
        };
        optimized_duration(&from, &to)
    }

    /// Interpolations scheduled since the last call.
    pub(crate) fn take_scheduled(&mut self) -> Vec<Interpolation> {
        std::mem::take(&mut self.scheduled)
    }

    fn current(&self, proxy: &RenderProxy, key: PropertyKey, now: f64) -> Option<AnimValue> {
        match self.tracks.get(&key) {
            Some(track) => Some(track.value_at(now)),
            None => proxy.value(key),
        }
    }

    /// Values `state` asks for, keyed by property.
    fn view_state(
        &self,
        state: &TargetState,
        proxy: &RenderProxy,
    ) -> SmallVec<[(PropertyKey, AnimValue); 8]> {
        let mut out = SmallVec::new();
        let mut transform = state.transform;
        if let Some(size) = state.size {
            if state.scale_based_size_change || self.target.scale_based_size_change {
                let current = proxy
                    .value(PropertyKey::Size)
                    .and_then(|v| v.as_size())
                    .unwrap_or(size);
                let base = transform.unwrap_or(Transform3D::IDENTITY);
                transform = Some(base.scaled(
                    ratio(size.width, current.width),
                    ratio(size.height, current.height),
                    1.0,
                ));
            } else {
                out.push((PropertyKey::Size, AnimValue::Size(size)));
            }
        }
        if let Some(p) = state.position {
            out.push((PropertyKey::Position, AnimValue::Point(p)));
        }
        if let Some(v) = state.opacity {
            out.push((PropertyKey::Opacity, AnimValue::Scalar(v)));
        }
        if let Some(v) = state.corner_radius {
            out.push((PropertyKey::CornerRadius, AnimValue::Scalar(v)));
        }
        if let Some(c) = state.background_color {
            out.push((PropertyKey::BackgroundColor, AnimValue::Color(c)));
        }
        if let Some(v) = state.border_width {
            out.push((PropertyKey::BorderWidth, AnimValue::Scalar(v)));
        }
        if let Some(c) = state.border_color {
            out.push((PropertyKey::BorderColor, AnimValue::Color(c)));
        }
        if state.display_shadow {
            if let Some(c) = state.shadow_color {
                out.push((PropertyKey::ShadowColor, AnimValue::Color(c)));
            }
            if let Some(v) = state.shadow_radius {
                out.push((PropertyKey::ShadowRadius, AnimValue::Scalar(v)));
            }
            if let Some(v) = state.shadow_opacity {
                out.push((PropertyKey::ShadowOpacity, AnimValue::Scalar(v)));
            }
            if let Some(o) = state.shadow_offset {
                out.push((PropertyKey::ShadowOffset, AnimValue::Offset(o)));
            }
        }
        if let Some(t) = transform {
            out.push((PropertyKey::Transform, AnimValue::Transform(t)));
        }
        if let Some(overlay) = state.overlay {
            out.push((PropertyKey::OverlayColor, AnimValue::Color(overlay.color)));
            out.push((PropertyKey::OverlayOpacity, AnimValue::Scalar(overlay.opacity)));
        }
        out
    }

    /// Write the begin state, record (from, to) per key and start every interpolation.
    ///
    /// Returns the time, delay included, until the last interpolation ends.
    pub(crate) fn start(&mut self, proxy: &mut RenderProxy, bounds: Rect, now: f64) -> f64 {
        if let Some(begin) = self.target.begin_state.as_deref() {
            for (key, value) in self.view_state(begin, proxy) {
                proxy.set(key, value);
            }
            if let Some(masks) = begin.masks_to_bounds {
                proxy.masks_to_bounds = masks;
            }
        }
        if !self.appearing
            && let Some(masks) = self.target.masks_to_bounds
        {
            proxy.masks_to_bounds = masks;
        }

        for (key, target) in self.view_state(&self.target, proxy) {
            let current = proxy.value(key).unwrap_or(target);
            let pair = if self.appearing {
                (target, current)
            } else {
                (current, target)
            };
            self.state.insert(key, pair);
        }
        self.animate(proxy, bounds, now, self.target.delay, self.duration)
    }

    fn animate(
        &mut self,
        proxy: &RenderProxy,
        bounds: Rect,
        now: f64,
        delay: f64,
        duration: f64,
    ) -> f64 {
        let timing = match self.target.timing_function {
            Some(tf) => tf,
            None => self.inferred_timing(proxy, bounds),
        };
        let begin_time = now + delay;
        let mut until_stop = duration;
        let pairs: Vec<_> = self.state.iter().map(|(k, v)| (*k, *v)).collect();
        for (key, (from, to)) in pairs {
            let track = self.track(key, from, to, timing, begin_time, duration);
            until_stop = until_stop.max(track.duration);
            tracing::trace!(
                node = %self.node,
                ?key,
                begin_time,
                duration = track.duration,
                "scheduled"
            );
            self.scheduled.push(track.clone());
            self.tracks.insert(key, track);
        }
        self.duration = duration;
        self.timing = timing;
        until_stop + delay
    }

    fn inferred_timing(&self, proxy: &RenderProxy, bounds: Rect) -> TimingFunction {
        let pair = |key: PropertyKey| self.state.get(&key).copied();
        let proxy_pos = proxy
            .value(PropertyKey::Position)
            .and_then(|v| v.as_point())
            .unwrap_or(Point::ZERO);
        let (from_pos, to_pos) = match pair(PropertyKey::Position) {
            Some((a, b)) => {
                let a = a.as_point().unwrap_or(proxy_pos);
                (a, b.as_point().unwrap_or(a))
            }
            None => (proxy_pos, proxy_pos),
        };
        let (from_t, to_t) = match pair(PropertyKey::Transform) {
            Some((a, b)) => (
                a.as_transform().unwrap_or(Transform3D::IDENTITY),
                b.as_transform().unwrap_or(Transform3D::IDENTITY),
            ),
            None => (Transform3D::IDENTITY, Transform3D::IDENTITY),
        };
        let origin = proxy.origin.to_vec2();
        let real = |t: Transform3D, p: Point| t.apply_point(Point::ZERO) + p.to_vec2() + origin;
        default_timing(real(from_t, from_pos), real(to_t, to_pos), bounds)
    }

    fn track(
        &self,
        key: PropertyKey,
        from: AnimValue,
        to: AnimValue,
        timing: TimingFunction,
        begin_time: f64,
        duration: f64,
    ) -> Interpolation {
        let arc_control = match (key, self.target.arc, from, to) {
            (PropertyKey::Position, Some(intensity), AnimValue::Point(a), AnimValue::Point(b)) => {
                arc_control_point(a, b, intensity)
            }
            _ => None,
        };
        let (curve, duration) = match self.target.spring {
            Some(spring) if arc_control.is_none() && key.allows_spring() => {
                (Curve::Spring(spring), spring.settling_duration())
            }
            _ => (Curve::Timing(timing), duration),
        };
        Interpolation {
            key,
            from,
            to,
            curve,
            arc_control,
            begin_time,
            duration,
            paused_at: None,
            reversed: false,
        }
    }

    /// Freeze every track at `time_passed` seconds into the transition.
    pub(crate) fn seek(&mut self, time_passed: f64) {
        let offset = time_passed - self.target.delay;
        for track in self.tracks.values_mut() {
            track.pause_at(offset.min(track.duration - SEEK_EPSILON).max(0.0));
        }
    }

    /// Restart every track on its recorded (from, to) curve at `time_passed` seconds into the
    /// transition, playing toward the end, or back toward the start when `reverse`.
    ///
    /// Returns the time until done, or `0` when there is nothing left to play.
    pub(crate) fn resume(&mut self, now: f64, time_passed: f64, reverse: bool) -> f64 {
        let offset = time_passed - self.target.delay;
        let pairs: Vec<_> = self.state.iter().map(|(k, v)| (*k, *v)).collect();
        let mut left: f64 = 0.0;
        for (key, (from, to)) in pairs {
            let mut track = self.track(key, from, to, self.timing, now, self.duration);
            track.resume_at(now, offset, reverse);
            left = left.max(if reverse { offset } else { track.duration - offset });
            tracing::trace!(node = %self.node, ?key, offset, reverse, "resumed");
            self.scheduled.push(track.clone());
            self.tracks.insert(key, track);
        }
        left.max(0.0)
    }

    /// Hold the keys of `state` at its values; a duration in `state` restarts the node with it.
    pub(crate) fn apply(
        &mut self,
        proxy: &mut RenderProxy,
        bounds: Rect,
        now: f64,
        state: &TargetState,
        time_passed: f64,
    ) {
        for (key, value) in self.view_state(state, proxy) {
            if !self.state.contains_key(&key) {
                let current = self.current(proxy, key, now).unwrap_or(value);
                self.state.insert(key, (current, current));
            }
            let hold = Interpolation {
                key,
                from: value,
                to: value,
                curve: Curve::Timing(TimingFunction::Linear),
                arc_control: None,
                begin_time: now,
                duration: 0.0,
                paused_at: None,
                reversed: false,
            };
            self.scheduled.push(hold.clone());
            self.tracks.insert(key, hold);
        }
        if let Some(masks) = state.masks_to_bounds {
            proxy.masks_to_bounds = masks;
        }
        if let Some(DurationSpec::Fixed(duration)) = state.duration {
            self.target.duration = Some(DurationSpec::Fixed(duration));
            let delay = self.target.delay - time_passed;
            self.animate(proxy, bounds, now, delay, duration);
        }
    }

    /// Sample every track at `now` into the proxy; returns what changed hands.
    pub(crate) fn sample(
        &self,
        proxy: &mut RenderProxy,
        now: f64,
    ) -> Vec<(PropertyKey, AnimValue)> {
        self.tracks
            .iter()
            .map(|(key, track)| {
                let value = track.value_at(now);
                proxy.set(*key, value);
                (*key, value)
            })
            .collect()
    }
}

fn ratio(target: f64, current: f64) -> f64 {
    if current == 0.0 { 1.0 } else { target / current }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/node_animation.rs"]
mod tests;
