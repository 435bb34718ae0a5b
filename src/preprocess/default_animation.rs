use std::fmt;
use std::str::FromStr;

use crate::animation::ease::TimingFunction;
use crate::context::transition::TransitionContext;
use crate::foundation::core::{Rgba, Size, Vec2};
use crate::modifier::apply::Modifier;
use crate::modifier::error::ParseError;
use crate::modifier::parser::{Arg, Call, parse_calls};
use crate::modifier::state::TargetState;
use crate::preprocess::{Preprocessor, StageInput};

/// Slide direction of a directional preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
    /// Towards the top edge.
    Up,
    /// Towards the bottom edge.
    Down,
}

impl Direction {
    /// The opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            _ => return None,
        })
    }
}

/// Which way directional presets go when picked automatically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionStrategy {
    /// Presenting moves left, dismissing moves right.
    #[default]
    ForceLeftToRight,
    /// Presenting moves right, dismissing moves left.
    ForceRightToLeft,
}

impl DirectionStrategy {
    /// Direction for a presenting or dismissing transition.
    pub fn default_direction(self, presenting: bool) -> Direction {
        match (self, presenting) {
            (Self::ForceLeftToRight, true) | (Self::ForceRightToLeft, false) => Direction::Left,
            _ => Direction::Right,
        }
    }
}

/// Built-in animation applied to the two root nodes.
///
/// The text form mirrors the constructors: `push(left)`, `selectBy(fade, zoom)`,
/// `autoReverse(cover(up))`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DefaultAnimation {
    /// Pick one from the container flags.
    #[default]
    Auto,
    /// Destination slides in over the source.
    Push(Direction),
    /// Source slides out, uncovering the destination which moves a third as far.
    Pull(Direction),
    /// Destination slides in over a static, dimmed source.
    Cover(Direction),
    /// Source slides out, uncovering a static destination.
    Uncover(Direction),
    /// Both slide by the full container size.
    Slide(Direction),
    /// Both slide and shrink.
    ZoomSlide(Direction),
    /// Destination slides in while the source shrinks back.
    PageIn(Direction),
    /// Source slides out revealing a shrunken destination.
    PageOut(Direction),
    /// Cross-fade.
    Fade,
    /// Source grows and fades, destination grows in from smaller.
    Zoom,
    /// Destination shrinks in and fades, source shrinks.
    ZoomOut,
    /// One preset when presenting, another when dismissing.
    SelectBy {
        /// Used when presenting.
        presenting: Box<DefaultAnimation>,
        /// Used when dismissing.
        dismissing: Box<DefaultAnimation>,
    },
    /// The preset when presenting, its reverse when dismissing.
    AutoReverse(Box<DefaultAnimation>),
    /// No preset.
    None,
}

impl DefaultAnimation {
    /// The preset that undoes this one visually.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Push(d) => Self::Pull(d.opposite()),
            Self::Pull(d) => Self::Push(d.opposite()),
            Self::Cover(d) => Self::Uncover(d.opposite()),
            Self::Uncover(d) => Self::Cover(d.opposite()),
            Self::Slide(d) => Self::Slide(d.opposite()),
            Self::ZoomSlide(d) => Self::ZoomSlide(d.opposite()),
            Self::PageIn(d) => Self::PageOut(d.opposite()),
            Self::PageOut(d) => Self::PageIn(d.opposite()),
            Self::Zoom => Self::ZoomOut,
            Self::ZoomOut => Self::Zoom,
            other => other.clone(),
        }
    }

    /// Unwrap `selectBy` and `autoReverse` for the given presentation direction.
    pub fn select(&self, presenting: bool) -> Self {
        match self {
            Self::SelectBy {
                presenting: p,
                dismissing: d,
            } => {
                if presenting {
                    p.select(presenting)
                } else {
                    d.select(presenting)
                }
            }
            Self::AutoReverse(p) => {
                let p = p.select(presenting);
                if presenting { p } else { p.reversed() }
            }
            other => other.clone(),
        }
    }

    fn from_call(call: &Call) -> Result<Self, ParseError> {
        let nested = |i: usize| -> Result<Self, ParseError> {
            match call.args.get(i) {
                Some(Arg::Call(c)) => Self::from_call(c),
                Some(other) => Err(ParseError::new(other.span().start, "expected a preset")),
                None => Err(ParseError::new(
                    call.span.end,
                    format!("{}: missing preset argument {i}", call.name),
                )),
            }
        };
        let direction = || -> Result<Direction, ParseError> {
            match call.args.first() {
                Some(Arg::Call(c)) if c.args.is_empty() => Direction::from_name(&c.name)
                    .ok_or_else(|| {
                        ParseError::new(c.span.start, format!("unknown direction '{}'", c.name))
                    }),
                Some(other) => Err(ParseError::new(other.span().start, "expected a direction")),
                None => Err(ParseError::new(
                    call.span.end,
                    format!("{}: missing direction", call.name),
                )),
            }
        };
        Ok(match call.name.as_str() {
            "auto" => Self::Auto,
            "none" => Self::None,
            "fade" => Self::Fade,
            "zoom" => Self::Zoom,
            "zoomOut" => Self::ZoomOut,
            "push" => Self::Push(direction()?),
            "pull" => Self::Pull(direction()?),
            "cover" => Self::Cover(direction()?),
            "uncover" => Self::Uncover(direction()?),
            "slide" => Self::Slide(direction()?),
            "zoomSlide" => Self::ZoomSlide(direction()?),
            "pageIn" => Self::PageIn(direction()?),
            "pageOut" => Self::PageOut(direction()?),
            "selectBy" => Self::SelectBy {
                presenting: Box::new(nested(0)?),
                dismissing: Box::new(nested(1)?),
            },
            "autoReverse" => Self::AutoReverse(Box::new(nested(0)?)),
            other => {
                return Err(ParseError::new(
                    call.span.start,
                    format!("unknown default animation '{other}'"),
                ));
            }
        })
    }
}

impl FromStr for DefaultAnimation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let calls = parse_calls(s)?;
        match calls.as_slice() {
            [call] => Self::from_call(call),
            [] => Err(ParseError::new(0, "empty default animation")),
            [_, second, ..] => Err(ParseError::new(
                second.span.start,
                "expected a single default animation",
            )),
        }
    }
}

impl fmt::Display for DefaultAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, dir) = match self {
            Self::Auto => return f.write_str("auto"),
            Self::None => return f.write_str("none"),
            Self::Fade => return f.write_str("fade"),
            Self::Zoom => return f.write_str("zoom"),
            Self::ZoomOut => return f.write_str("zoomOut"),
            Self::SelectBy {
                presenting,
                dismissing,
            } => return write!(f, "selectBy({presenting}, {dismissing})"),
            Self::AutoReverse(p) => return write!(f, "autoReverse({p})"),
            Self::Push(d) => ("push", d),
            Self::Pull(d) => ("pull", d),
            Self::Cover(d) => ("cover", d),
            Self::Uncover(d) => ("uncover", d),
            Self::Slide(d) => ("slide", d),
            Self::ZoomSlide(d) => ("zoomSlide", d),
            Self::PageIn(d) => ("pageIn", d),
            Self::PageOut(d) => ("pageOut", d),
        };
        write!(f, "{name}({})", dir.as_str())
    }
}

impl TryFrom<String> for DefaultAnimation {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DefaultAnimation> for String {
    fn from(a: DefaultAnimation) -> Self {
        a.to_string()
    }
}

const PRESET_DURATION: f64 = 0.35;
const DIM: f64 = 0.1;

/// Injects the session's default animation onto the two root nodes.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultAnimationPreset;

impl Preprocessor for DefaultAnimationPreset {
    fn name(&self) -> &str {
        "default_animation"
    }

    fn process(&mut self, ctx: &mut TransitionContext, input: &StageInput<'_>) {
        let (Some(from), Some(to)) = (ctx.source_root(), ctx.destination_root()) else {
            return;
        };
        let opts = input.opts;
        let presenting = opts.presenting;
        let mut preset = opts.default_animation.select(presenting);

        if preset == DefaultAnimation::Auto {
            let view: &TransitionContext = ctx;
            let claimed = input
                .animators
                .iter()
                .any(|a| a.can_animate(view, to, true) || a.can_animate(view, from, false));
            let dir = opts.direction_strategy.default_direction(presenting);
            preset = if claimed {
                DefaultAnimation::None
            } else if opts.in_navigation {
                if presenting {
                    DefaultAnimation::Push(dir)
                } else {
                    DefaultAnimation::Pull(dir)
                }
            } else if opts.in_tab {
                DefaultAnimation::Slide(dir)
            } else {
                DefaultAnimation::Fade
            };
        }
        if preset == DefaultAnimation::None {
            return;
        }
        tracing::debug!(preset = %preset, "applying default animation");

        let primed = [
            Modifier::TimingFunction(TimingFunction::Standard),
            Modifier::Duration(PRESET_DURATION),
        ];
        let mut from_state = TargetState::from_modifiers(&primed);
        let mut to_state = TargetState::from_modifiers(&primed);
        let size = ctx.container_bounds().size();
        let shadow = || {
            Modifier::BeginWith(vec![
                Modifier::ShadowOpacity(0.5),
                Modifier::ShadowColor(Rgba::BLACK),
                Modifier::ShadowRadius(5.0),
                Modifier::ShadowOffset(Vec2::ZERO),
                Modifier::MasksToBounds(false),
            ])
        };
        let slide = |d: Direction, appearing: bool, div: f64| {
            let s = shift(d, appearing, size) / div;
            Modifier::translate(s.x, s.y)
        };
        let dim = || Modifier::overlay(Rgba::BLACK, DIM);
        let decelerate = || Modifier::TimingFunction(TimingFunction::Deceleration);
        // Leading side of push, cover and pageIn: slides in with a primed shadow.
        let lead_in = |d: Direction| {
            vec![
                slide(d, true, 1.0),
                Modifier::ShadowOpacity(0.0),
                shadow(),
                decelerate(),
            ]
        };
        // Leaving side of pull, uncover and pageOut.
        let lead_out = |d: Direction| {
            vec![
                slide(d, false, 1.0),
                Modifier::ShadowOpacity(0.0),
                shadow(),
            ]
        };

        let (insert_to_first, from_mods, to_mods) = match preset {
            DefaultAnimation::Push(d) => (
                Some(false),
                vec![slide(d, false, 3.0), dim(), decelerate()],
                lead_in(d),
            ),
            DefaultAnimation::Pull(d) => {
                (Some(true), lead_out(d), vec![slide(d, true, 3.0), dim()])
            }
            DefaultAnimation::Cover(d) => (Some(false), vec![dim(), decelerate()], lead_in(d)),
            DefaultAnimation::Uncover(d) => (Some(true), lead_out(d), vec![dim()]),
            DefaultAnimation::PageIn(d) => (
                Some(false),
                vec![Modifier::scale(0.7), dim(), decelerate()],
                lead_in(d),
            ),
            DefaultAnimation::PageOut(d) => {
                (Some(true), lead_out(d), vec![Modifier::scale(0.7), dim()])
            }
            DefaultAnimation::Slide(d) => {
                (None, vec![slide(d, false, 1.0)], vec![slide(d, true, 1.0)])
            }
            DefaultAnimation::ZoomSlide(d) => (
                None,
                vec![slide(d, false, 1.0), Modifier::scale(0.8)],
                vec![slide(d, true, 1.0), Modifier::scale(0.8)],
            ),
            DefaultAnimation::Zoom => (
                Some(true),
                vec![Modifier::scale(1.3), Modifier::Fade],
                vec![Modifier::scale(0.7)],
            ),
            DefaultAnimation::ZoomOut => (
                Some(false),
                vec![Modifier::scale(0.7)],
                vec![Modifier::scale(1.3), Modifier::Fade],
            ),
            DefaultAnimation::Fade => {
                let layer = input.host.layer(from);
                let mut to_mods = Vec::new();
                if !(opts.from_over_full_screen && !presenting) {
                    to_mods.push(Modifier::Fade);
                }
                let mut from_mods = Vec::new();
                if (!presenting && opts.to_over_full_screen)
                    || !layer.is_opaque
                    || layer.background_alpha() < 1.0
                {
                    from_mods.push(Modifier::Fade);
                }
                to_mods.push(Modifier::DurationMatchLongest);
                from_mods.push(Modifier::DurationMatchLongest);
                (None, from_mods, to_mods)
            }
            DefaultAnimation::Auto
            | DefaultAnimation::None
            | DefaultAnimation::SelectBy { .. }
            | DefaultAnimation::AutoReverse(_) => return,
        };

        if let Some(first) = insert_to_first {
            ctx.set_insert_to_first(first);
        }
        from_state.extend(&from_mods);
        to_state.extend(&to_mods);
        ctx.set_state(from, from_state);
        ctx.set_state(to, to_state);
    }
}

/// Offset that moves a root fully out of the container in `direction`.
///
/// Appearing nodes start on the side they travel from; disappearing nodes leave towards the
/// travel direction.
pub fn shift(direction: Direction, appearing: bool, size: Size) -> Vec2 {
    match direction {
        Direction::Left | Direction::Right => {
            let x = if (direction == Direction::Right) == appearing {
                -size.width
            } else {
                size.width
            };
            Vec2::new(x, 0.0)
        }
        Direction::Up | Direction::Down => {
            let y = if (direction == Direction::Down) == appearing {
                -size.height
            } else {
                size.height
            };
            Vec2::new(0.0, y)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preprocess/default_animation.rs"]
mod tests;
