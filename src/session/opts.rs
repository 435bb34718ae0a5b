use crate::preprocess::default_animation::{DefaultAnimation, DirectionStrategy};

/// Which tree's proxies are stacked on top.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyOrdering {
    /// Destination on top when presenting, source on top when dismissing outside a tab bar.
    #[default]
    Auto,
    /// Source proxies stacked above destination proxies.
    SourceOnTop,
    /// Destination proxies stacked above source proxies.
    DestinationOnTop,
}

/// Options controlling one `TransitionSession`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionOpts {
    /// Preset injected onto the two roots.
    pub default_animation: DefaultAnimation,
    /// Direction used when the preset direction is chosen automatically.
    pub direction_strategy: DirectionStrategy,
    /// Proxy stacking order.
    pub ordering: ProxyOrdering,
    /// `true` when the destination is being presented, `false` when it is being dismissed to.
    pub presenting: bool,
    /// The transition runs inside a stacked-navigation container.
    pub in_navigation: bool,
    /// The transition runs inside a tabbed container.
    pub in_tab: bool,
    /// The source tree is presented over the full screen.
    pub from_over_full_screen: bool,
    /// The destination tree is presented over the full screen.
    pub to_over_full_screen: bool,
}

impl Default for TransitionOpts {
    fn default() -> Self {
        Self {
            default_animation: DefaultAnimation::Auto,
            direction_strategy: DirectionStrategy::default(),
            ordering: ProxyOrdering::Auto,
            presenting: true,
            in_navigation: false,
            in_tab: false,
            from_over_full_screen: false,
            to_over_full_screen: false,
        }
    }
}

impl TransitionOpts {
    /// Whether destination proxies are created (and stacked) before source proxies.
    pub fn insert_to_first(&self) -> bool {
        (self.ordering == ProxyOrdering::Auto && !self.presenting && !self.in_tab)
            || self.ordering == ProxyOrdering::SourceOnTop
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
