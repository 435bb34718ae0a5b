use std::collections::BTreeMap;

use crate::animator::node_animation::NodeAnimation;
use crate::animator::record::ScheduleObserver;
use crate::animator::{Animator, AnimatorCx, Playback};
use crate::context::transition::TransitionContext;
use crate::foundation::core::NodeId;
use crate::modifier::state::{DurationSpec, TargetState};

/// Property animator for every node whose state sets an animatable field.
///
/// Each node gets one interpolation per key of its target state, all starting together after
/// the node's delay. Disappearing nodes animate from their current values to the target;
/// appearing nodes the other way round.
#[derive(Default)]
pub struct DefaultAnimator {
    nodes: BTreeMap<NodeId, NodeAnimation>,
    observer: Option<Box<dyn ScheduleObserver>>,
}

impl DefaultAnimator {
    /// Animator without a schedule observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every scheduled interpolation to `observer`.
    pub fn with_observer(mut self, observer: impl ScheduleObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Number of nodes currently animated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when no node is animated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn flush(&mut self) {
        for anim in self.nodes.values_mut() {
            let started = anim.take_scheduled();
            if let Some(observer) = self.observer.as_deref_mut() {
                for track in &started {
                    observer.scheduled(anim.node, track);
                }
            }
        }
    }
}

impl std::fmt::Debug for DefaultAnimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultAnimator")
            .field("nodes", &self.nodes.len())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Animator for DefaultAnimator {
    fn can_animate(&self, context: &TransitionContext, node: NodeId, _appearing: bool) -> bool {
        context.state(node).is_some_and(|s| s.can_animate())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(from = from.len(), to = to.len()))]
    fn animate(&mut self, cx: &mut AnimatorCx<'_>, from: &[NodeId], to: &[NodeId]) -> Playback {
        self.nodes.clear();
        let sides = from.iter().map(|n| (*n, false)).chain(to.iter().map(|n| (*n, true)));
        for (node, appearing) in sides {
            let Some(target) = cx.context.state(node).cloned() else {
                continue;
            };
            cx.context.proxy(cx.host, node);
            self.nodes
                .insert(node, NodeAnimation::new(node, appearing, target));
        }

        let mut longest: f64 = 0.0;
        for anim in self.nodes.values_mut() {
            match anim.target.duration {
                Some(DurationSpec::Fixed(d)) => {
                    longest = longest.max(d);
                    continue;
                }
                Some(DurationSpec::MatchLongest) => continue,
                None => {}
            }
            let Some(proxy) = cx.context.existing_proxy(anim.node) else {
                continue;
            };
            let d = anim.optimized_duration(proxy);
            if anim.target.duration.is_none() {
                anim.target.duration = Some(DurationSpec::Fixed(d));
            }
            longest = longest.max(d);
        }

        let bounds = cx.context.container_bounds();
        let mut total: f64 = 0.0;
        for anim in self.nodes.values_mut() {
            let duration = match anim.target.duration {
                Some(DurationSpec::Fixed(d)) => d,
                _ => longest,
            };
            anim.target.duration = Some(DurationSpec::Fixed(duration));
            anim.duration = duration;
            let Some(proxy) = cx.context.proxy_mut(anim.node) else {
                continue;
            };
            total = total.max(anim.start(proxy, bounds, cx.now));
        }
        self.flush();
        tracing::debug!(nodes = self.nodes.len(), total, "started animations");
        Playback::Timed(total)
    }

    fn seek_to(&mut self, _cx: &mut AnimatorCx<'_>, time_passed: f64) {
        for anim in self.nodes.values_mut() {
            anim.seek(time_passed);
        }
    }

    fn resume(&mut self, cx: &mut AnimatorCx<'_>, time_passed: f64, reverse: bool) -> f64 {
        let mut longest: f64 = 0.0;
        for anim in self.nodes.values_mut() {
            longest = longest.max(anim.resume(cx.now, time_passed, reverse));
        }
        self.flush();
        tracing::debug!(time_passed, reverse, longest, "resumed animations");
        longest
    }

    fn apply(
        &mut self,
        cx: &mut AnimatorCx<'_>,
        state: &TargetState,
        node: NodeId,
        time_passed: f64,
    ) {
        let bounds = cx.context.container_bounds();
        let (Some(anim), Some(proxy)) = (self.nodes.get_mut(&node), cx.context.proxy_mut(node))
        else {
            return;
        };
        anim.apply(proxy, bounds, cx.now, state, time_passed);
        self.flush();
    }

    fn present(&mut self, cx: &mut AnimatorCx<'_>) {
        for anim in self.nodes.values() {
            let Some(proxy) = cx.context.proxy_mut(anim.node) else {
                continue;
            };
            for (key, value) in anim.sample(proxy, cx.now) {
                cx.host.present(anim.node, key, value);
            }
        }
    }

    fn clean(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animator/default.rs"]
mod tests;
