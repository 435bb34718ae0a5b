use crate::animation::ease::TimingFunction;
use crate::foundation::core::{Point, Rgba, Size, Vec2};
use crate::modifier::apply::Modifier;
use crate::modifier::condition::Condition;
use crate::modifier::error::ParseError;
use crate::modifier::parser::{Arg, Call, parse_calls};
use crate::modifier::state::{CascadeDirection, CascadeSpec, CoordinateSpace, SnapshotStrategy};

/// Parse modifier text such as `"fade translate(0,150) scale(0.8)"`.
///
/// Any unknown name or malformed argument list is an error.
pub fn parse_modifiers(src: &str) -> Result<Vec<Modifier>, ParseError> {
    let calls = parse_calls(src)?;
    calls.iter().map(lower_call).collect()
}

/// Parse modifier text, skipping entries that cannot be understood.
///
/// Syntax errors still drop the whole string; unknown names and bad arguments only drop the
/// offending entry. Everything skipped is logged.
pub fn parse_modifiers_lossy(src: &str) -> Vec<Modifier> {
    let calls = match parse_calls(src) {
        Ok(calls) => calls,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unparsable modifier text");
            return Vec::new();
        }
    };
    calls
        .iter()
        .filter_map(|c| match lower_call(c) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(modifier = %c.name, error = %e, "skipping modifier");
                None
            }
        })
        .collect()
}

struct Args<'a> {
    call: &'a Call,
}

impl<'a> Args<'a> {
    fn number(&self, i: usize) -> Result<Option<f64>, ParseError> {
        match self.call.args.get(i) {
            None => Ok(None),
            Some(Arg::Number(v, _)) => Ok(Some(*v)),
            Some(other) => Err(ParseError::new(
                other.span().start,
                format!("{}: argument {i} must be a number", self.call.name),
            )),
        }
    }

    fn number_or(&self, i: usize, default: f64) -> Result<f64, ParseError> {
        Ok(self.number(i)?.unwrap_or(default))
    }

    fn required(&self, i: usize) -> Result<f64, ParseError> {
        self.number(i)?.ok_or_else(|| {
            ParseError::new(
                self.call.span.end,
                format!("{}: missing numeric argument {i}", self.call.name),
            )
        })
    }

    fn boolean_or(&self, i: usize, default: bool) -> Result<bool, ParseError> {
        match self.call.args.get(i) {
            None => Ok(default),
            Some(Arg::Bool(b, _)) => Ok(*b),
            Some(other) => Err(ParseError::new(
                other.span().start,
                format!("{}: argument {i} must be true or false", self.call.name),
            )),
        }
    }

    fn name(&self, i: usize) -> Result<Option<&'a Call>, ParseError> {
        match self.call.args.get(i) {
            None => Ok(None),
            Some(Arg::Call(c)) => Ok(Some(c)),
            Some(other) => Err(ParseError::new(
                other.span().start,
                format!("{}: argument {i} must be a name", self.call.name),
            )),
        }
    }

    fn nested(&self) -> Result<Vec<Modifier>, ParseError> {
        self.call
            .args
            .iter()
            .map(|a| match a {
                Arg::Call(c) => lower_call(c),
                other => Err(ParseError::new(
                    other.span().start,
                    format!("{}: expected nested modifiers", self.call.name),
                )),
            })
            .collect()
    }
}

fn lower_call(call: &Call) -> Result<Modifier, ParseError> {
    let a = Args { call };
    let m = match call.name.as_str() {
        "fade" => Modifier::Fade,
        "opacity" => Modifier::Opacity(a.number_or(0, 1.0)?),
        "position" => Modifier::Position(Point::new(a.required(0)?, a.required(1)?)),
        "size" => Modifier::Size(Size::new(a.required(0)?, a.required(1)?)),
        "scale" => {
            if call.args.len() == 1 {
                Modifier::scale(a.required(0)?)
            } else {
                Modifier::Scale {
                    x: a.number_or(0, 1.0)?,
                    y: a.number_or(1, 1.0)?,
                    z: a.number_or(2, 1.0)?,
                }
            }
        }
        "rotate" => {
            if call.args.len() == 1 {
                Modifier::rotate(a.required(0)?)
            } else {
                Modifier::Rotate {
                    x: a.number_or(0, 0.0)?,
                    y: a.number_or(1, 0.0)?,
                    z: a.number_or(2, 0.0)?,
                }
            }
        }
        "translate" => Modifier::Translate {
            x: a.number_or(0, 0.0)?,
            y: a.number_or(1, 0.0)?,
            z: a.number_or(2, 0.0)?,
        },
        "perspective" => Modifier::Perspective(a.required(0)?),
        "cornerRadius" => Modifier::CornerRadius(a.required(0)?),
        "zPosition" => Modifier::ZPosition(a.required(0)?),
        "borderWidth" => Modifier::BorderWidth(a.required(0)?),
        "shadowOpacity" => Modifier::ShadowOpacity(a.required(0)?),
        "shadowRadius" => Modifier::ShadowRadius(a.required(0)?),
        "shadowOffset" => Modifier::ShadowOffset(Vec2::new(a.required(0)?, a.required(1)?)),
        "masksToBounds" => Modifier::MasksToBounds(a.boolean_or(0, true)?),
        "overlay" => Modifier::overlay(
            Rgba::new(a.required(0)?, a.required(1)?, a.required(2)?, 1.0),
            a.required(3)?,
        ),
        "duration" => Modifier::Duration(a.required(0)?),
        "durationMatchLongest" => Modifier::DurationMatchLongest,
        "delay" => Modifier::Delay(a.required(0)?),
        "spring" => Modifier::spring(a.number_or(0, 250.0)?, a.number_or(1, 30.0)?),
        "timingFunction" => Modifier::TimingFunction(lower_timing(&a)?),
        "arc" => Modifier::Arc(a.number_or(0, 1.0)?),
        "cascade" => Modifier::Cascade(lower_cascade(&a)?),
        "source" => {
            let id = a.name(0)?.ok_or_else(|| {
                ParseError::new(call.span.end, "source: missing identifier")
            })?;
            Modifier::Source(id.name.clone())
        }
        "useGlobalCoordinateSpace" => Modifier::CoordinateSpace(CoordinateSpace::Global),
        "ignoreSubviewModifiers" => Modifier::IgnoreSubtreeModifiers {
            recursive: a.boolean_or(0, false)?,
        },
        "useOptimizedSnapshot" => Modifier::Snapshot(SnapshotStrategy::Optimized),
        "useNormalSnapshot" => Modifier::Snapshot(SnapshotStrategy::Normal),
        "useLayerRenderSnapshot" => Modifier::Snapshot(SnapshotStrategy::LayerRender),
        "useNoSnapshot" => Modifier::Snapshot(SnapshotStrategy::NoSnapshot),
        "forceAnimate" => Modifier::ForceAnimate,
        "forceNonFade" => Modifier::ForceNonFade,
        "useScaleBasedSizeChange" => Modifier::ScaleBasedSizeChange,
        "beginWith" => Modifier::BeginWith(a.nested()?),
        "whenMatched" => Modifier::When(Condition::Matched, a.nested()?),
        "whenNotMatched" => Modifier::When(Condition::NotMatched, a.nested()?),
        "whenPresenting" => Modifier::When(Condition::Presenting, a.nested()?),
        "whenDismissing" => Modifier::When(Condition::Dismissing, a.nested()?),
        "whenAppearing" => Modifier::When(Condition::Appearing, a.nested()?),
        "whenDisappearing" => Modifier::When(Condition::Disappearing, a.nested()?),
        "whenAncestorMatched" => Modifier::When(Condition::AncestorMatched, a.nested()?),
        other => {
            return Err(ParseError::new(
                call.span.start,
                format!("unknown modifier '{other}'"),
            ));
        }
    };
    Ok(m)
}

fn lower_timing(a: &Args<'_>) -> Result<TimingFunction, ParseError> {
    if let Some(Arg::Call(named)) = a.call.args.first() {
        return TimingFunction::from_name(&named.name).ok_or_else(|| {
            ParseError::new(
                named.span.start,
                format!("unknown timing function '{}'", named.name),
            )
        });
    }
    Ok(TimingFunction::CubicBezier {
        x1: a.required(0)?,
        y1: a.required(1)?,
        x2: a.required(2)?,
        y2: a.required(3)?,
    })
}

fn lower_cascade(a: &Args<'_>) -> Result<CascadeSpec, ParseError> {
    let mut spec = CascadeSpec {
        delta: a.number_or(0, 0.02)?,
        ..CascadeSpec::default()
    };
    if let Some(dir) = a.name(1)? {
        let d = Args { call: dir };
        spec.direction = match dir.name.as_str() {
            "radial" => CascadeDirection::Radial(Point::new(d.required(0)?, d.required(1)?)),
            "inverseRadial" => {
                CascadeDirection::InverseRadial(Point::new(d.required(0)?, d.required(1)?))
            }
            name => CascadeDirection::from_name(name).ok_or_else(|| {
                ParseError::new(dir.span.start, format!("unknown cascade direction '{name}'"))
            })?,
        };
    }
    spec.delay_matched = a.boolean_or(2, false)?;
    Ok(spec)
}

#[cfg(test)]
#[path = "../../tests/unit/modifier/text.rs"]
mod tests;
