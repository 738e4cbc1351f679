//! Tree walker turning a `serde_json::Value` into a validated [`Document`].
//!
//! Fields are read in schema order, depth first, and the walk stops at the
//! first problem. Id references are checked afterwards by [`crate::refs`].

use keyframes_data::model::{
    AnimationGroup, Animatable, Color, Document, Effects, Feature, Frame, Gradient, GradientType,
    Keyframe, LineCap, Number, PathTrim, Point, Property, PropertyKind, Rotation, TimingCurve,
};
use serde_json::{Map, Value};

use crate::error::{DecodeError, Result};
use crate::options::{DecodeOptions, KeyframeOrder};
use crate::path::Cursor;
use crate::refs;

type Object = Map<String, Value>;

const DOCUMENT_FIELDS: &[&str] = &[
    "key",
    "name",
    "canvas_size",
    "frame_rate",
    "animation_frame_count",
    "features",
    "animation_groups",
];
const GROUP_FIELDS: &[&str] = &["group_id", "group_name", "parent_group", "animations"];
const FEATURE_FIELDS: &[&str] = &[
    "name",
    "feature_id",
    "masking",
    "backed_image",
    "from_frame",
    "to_frame",
    "size",
    "fill_color",
    "stroke_color",
    "stroke_width",
    "stroke_line_cap",
    "effects",
    "path_trim",
    "animation_group",
    "feature_animations",
    "timing_curves",
    "key_frames",
];
const PROPERTY_FIELDS: &[&str] = &["property", "timing_curves", "key_values"];
const ANIMATABLE_FIELDS: &[&str] = &["timing_curves", "key_values"];
const KEYFRAME_FIELDS: &[&str] = &["start_frame", "data"];
const EFFECTS_FIELDS: &[&str] = &["gradient"];
const GRADIENT_FIELDS: &[&str] = &[
    "gradient_type",
    "color_start",
    "color_end",
    "ramp_start",
    "ramp_end",
];
const PATH_TRIM_FIELDS: &[&str] = &["path_trim_start", "path_trim_end", "path_trim_offset"];

/// Short description of a value's shape for error messages.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) if n.is_f64() => format!("number {n}"),
        Value::Number(n) => format!("integer {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of length {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

fn arity_text(arity: &[usize]) -> String {
    arity
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

pub(crate) struct Decoder<'o> {
    options: &'o DecodeOptions,
}

impl<'o> Decoder<'o> {
    pub(crate) fn new(options: &'o DecodeOptions) -> Self {
        Decoder { options }
    }

    pub(crate) fn document(&self, value: &Value) -> Result<Document> {
        let at = Cursor::Root;
        let obj = self.object(value, &at)?;
        self.check_fields(obj, &at, DOCUMENT_FIELDS)?;

        let key = self.required(obj, "key", &at, Self::integer)?;
        let name = self.required(obj, "name", &at, Self::string)?;
        let canvas_size = self.required(obj, "canvas_size", &at, Self::point)?;
        let frame_rate = self.required(obj, "frame_rate", &at, Self::frame_rate)?;
        let animation_frame_count =
            self.required(obj, "animation_frame_count", &at, Self::frame)?;
        let features = self.required(obj, "features", &at, |d, v, at| {
            d.list(v, at, |d, v, at| d.feature(v, at, 0))
        })?;
        let animation_groups = self.required(obj, "animation_groups", &at, |d, v, at| {
            d.list(v, at, Self::animation_group)
        })?;

        let doc = Document {
            key,
            name,
            canvas_size,
            frame_rate,
            animation_frame_count,
            features,
            animation_groups,
        };
        refs::resolve(&doc)?;
        Ok(doc)
    }

    fn animation_group(&self, value: &Value, at: &Cursor<'_>) -> Result<AnimationGroup> {
        let obj = self.object(value, at)?;
        self.check_fields(obj, at, GROUP_FIELDS)?;

        Ok(AnimationGroup {
            group_id: self.required(obj, "group_id", at, Self::integer)?,
            group_name: self.required(obj, "group_name", at, Self::string)?,
            parent_group: self.optional(obj, "parent_group", at, Self::integer)?,
            animations: self.required(obj, "animations", at, |d, v, at| {
                d.list(v, at, Self::property)
            })?,
        })
    }

    fn feature(&self, value: &Value, at: &Cursor<'_>, depth: usize) -> Result<Feature> {
        let max = self.options.max_masking_depth;
        if depth > max {
            return Err(DecodeError::schema(
                at.to_path(),
                format!("masking nested at most {max} deep"),
                format!("masking nested {depth} deep"),
            ));
        }
        let obj = self.object(value, at)?;
        self.check_fields(obj, at, FEATURE_FIELDS)?;

        let name = self.required(obj, "name", at, Self::string)?;
        let feature_id = self.required(obj, "feature_id", at, Self::integer)?;
        let masking = self.optional(obj, "masking", at, |d, v, at| {
            d.feature(v, at, depth + 1).map(Box::new)
        })?;
        let backed_image = self.optional(obj, "backed_image", at, Self::string)?;
        let from_frame = self.optional(obj, "from_frame", at, Self::number)?;
        let to_frame = self.optional(obj, "to_frame", at, Self::number)?;
        if let (Some(from), Some(to)) = (from_frame, to_frame) {
            if to.as_f64() < from.as_f64() {
                return Err(DecodeError::schema(
                    at.key("to_frame").to_path(),
                    format!("number >= {from}"),
                    format!("number {to}"),
                ));
            }
        }
        let size = self.optional(obj, "size", at, Self::point)?;
        let fill_color = self.optional(obj, "fill_color", at, Self::color)?;
        let stroke_color = self.optional(obj, "stroke_color", at, Self::color)?;
        let stroke_width = self.optional(obj, "stroke_width", at, Self::non_negative)?;
        let stroke_line_cap = self.optional(obj, "stroke_line_cap", at, Self::line_cap)?;
        let effects = self.optional(obj, "effects", at, Self::effects)?;
        let path_trim = self.optional(obj, "path_trim", at, Self::path_trim)?;
        let animation_group = self.optional(obj, "animation_group", at, Self::integer)?;
        let feature_animations = self.optional(obj, "feature_animations", at, |d, v, at| {
            d.list(v, at, Self::property)
        })?;
        let timing_curves = self.optional(obj, "timing_curves", at, |d, v, at| {
            d.list(v, at, Self::timing_curve)
        })?;
        let key_frames = self.optional(obj, "key_frames", at, |d, v, at| {
            d.keyframes(v, at, |d, v, at| d.list(v, at, Self::string))
        })?;

        Ok(Feature {
            name,
            feature_id,
            masking,
            backed_image,
            from_frame,
            to_frame,
            size,
            fill_color,
            stroke_color,
            stroke_width,
            stroke_line_cap,
            effects,
            path_trim,
            animation_group,
            feature_animations,
            timing_curves,
            key_frames,
        })
    }

    fn property(&self, value: &Value, at: &Cursor<'_>) -> Result<Property> {
        let obj = self.object(value, at)?;
        self.check_fields(obj, at, PROPERTY_FIELDS)?;

        let tag = self.required(obj, "property", at, Self::text)?;
        let kind = PropertyKind::from_tag(tag).ok_or_else(|| {
            DecodeError::unknown_variant(at.key("property").to_path(), tag, PropertyKind::TAGS)
        })?;
        let tag = kind.as_str();

        Ok(match kind {
            PropertyKind::AnchorPoint => {
                Property::AnchorPoint(self.animatable(obj, at, tag, Self::point_payload)?)
            }
            PropertyKind::XPosition => {
                Property::XPosition(self.animatable(obj, at, tag, Self::scalar_payload)?)
            }
            PropertyKind::YPosition => {
                Property::YPosition(self.animatable(obj, at, tag, Self::scalar_payload)?)
            }
            PropertyKind::Rotation => {
                Property::Rotation(self.animatable(obj, at, tag, Self::rotation_payload)?)
            }
            PropertyKind::Scale => {
                Property::Scale(self.animatable(obj, at, tag, Self::point_payload)?)
            }
            PropertyKind::Opacity => {
                Property::Opacity(self.animatable(obj, at, tag, Self::scalar_payload)?)
            }
            PropertyKind::StrokeWidth => {
                Property::StrokeWidth(self.animatable(obj, at, tag, Self::scalar_payload)?)
            }
            PropertyKind::StrokeColor => {
                Property::StrokeColor(self.animatable(obj, at, tag, Self::color_payload)?)
            }
            PropertyKind::FillColor => {
                Property::FillColor(self.animatable(obj, at, tag, Self::color_payload)?)
            }
        })
    }

    fn effects(&self, value: &Value, at: &Cursor<'_>) -> Result<Effects> {
        let obj = self.object(value, at)?;
        self.check_fields(obj, at, EFFECTS_FIELDS)?;
        Ok(Effects {
            gradient: self.optional(obj, "gradient", at, Self::gradient)?,
        })
    }

    fn gradient(&self, value: &Value, at: &Cursor<'_>) -> Result<Gradient> {
        let obj = self.object(value, at)?;
        self.check_fields(obj, at, GRADIENT_FIELDS)?;

        let tag = self.required(obj, "gradient_type", at, Self::text)?;
        let gradient_type = GradientType::from_tag(tag).ok_or_else(|| {
            DecodeError::unknown_variant(at.key("gradient_type").to_path(), tag, GradientType::TAGS)
        })?;

        Ok(Gradient {
            gradient_type,
            color_start: self.optional(obj, "color_start", at, |d, v, at| {
                d.animatable_object(v, at, "color_start", Self::color_payload)
            })?,
            color_end: self.optional(obj, "color_end", at, |d, v, at| {
                d.animatable_object(v, at, "color_end", Self::color_payload)
            })?,
            ramp_start: self.optional(obj, "ramp_start", at, |d, v, at| {
                d.animatable_object(v, at, "ramp_start", Self::scalar_payload)
            })?,
            ramp_end: self.optional(obj, "ramp_end", at, |d, v, at| {
                d.animatable_object(v, at, "ramp_end", Self::scalar_payload)
            })?,
        })
    }

    fn path_trim(&self, value: &Value, at: &Cursor<'_>) -> Result<PathTrim> {
        let obj = self.object(value, at)?;
        self.check_fields(obj, at, PATH_TRIM_FIELDS)?;

        Ok(PathTrim {
            start: self.optional(obj, "path_trim_start", at, |d, v, at| {
                d.animatable_object(v, at, "path_trim_start", Self::scalar_payload)
            })?,
            end: self.optional(obj, "path_trim_end", at, |d, v, at| {
                d.animatable_object(v, at, "path_trim_end", Self::scalar_payload)
            })?,
            offset: self.optional(obj, "path_trim_offset", at, |d, v, at| {
                d.animatable_object(v, at, "path_trim_offset", Self::scalar_payload)
            })?,
        })
    }

    // Animatables

    /// An animatable stored as its own object (gradient stops, path trims).
    fn animatable_object<T>(
        &self,
        value: &Value,
        at: &Cursor<'_>,
        tag: &str,
        payload: impl Fn(&Self, &Value, &Cursor<'_>, &str) -> Result<T>,
    ) -> Result<Animatable<T>> {
        let obj = self.object(value, at)?;
        self.check_fields(obj, at, ANIMATABLE_FIELDS)?;
        self.animatable(obj, at, tag, payload)
    }

    /// Reads `timing_curves` and `key_values` from `obj`, then checks that
    /// there is one curve per transition.
    fn animatable<T>(
        &self,
        obj: &Object,
        at: &Cursor<'_>,
        tag: &str,
        payload: impl Fn(&Self, &Value, &Cursor<'_>, &str) -> Result<T>,
    ) -> Result<Animatable<T>> {
        let timing_curves = self.required(obj, "timing_curves", at, |d, v, at| {
            d.list(v, at, Self::timing_curve)
        })?;
        let key_values = self.required(obj, "key_values", at, |d, v, at| {
            d.keyframes(v, at, |d, v, at| payload(d, v, at, tag))
        })?;

        let expected = key_values.len().saturating_sub(1);
        if timing_curves.len() != expected {
            return Err(DecodeError::CurveCountMismatch {
                path: at.to_path(),
                key_values: key_values.len(),
                expected,
                found: timing_curves.len(),
            });
        }
        Ok(Animatable::new(timing_curves, key_values))
    }

    fn keyframes<'v, T>(
        &self,
        value: &'v Value,
        at: &Cursor<'_>,
        read: impl Fn(&Self, &'v Value, &Cursor<'_>) -> Result<T>,
    ) -> Result<Vec<Keyframe<T>>> {
        let items = self.array(value, at)?;
        let mut out = Vec::with_capacity(items.len());
        let mut previous: Option<Frame> = None;

        for (i, item) in items.iter().enumerate() {
            let here = at.index(i);
            let obj = self.object(item, &here)?;
            self.check_fields(obj, &here, KEYFRAME_FIELDS)?;

            let start_frame = self.required(obj, "start_frame", &here, Self::frame)?;
            if let (KeyframeOrder::NonDecreasing, Some(prev)) =
                (self.options.keyframe_order, previous)
            {
                if start_frame < prev {
                    return Err(DecodeError::schema(
                        here.key("start_frame").to_path(),
                        format!("start_frame >= {prev}"),
                        format!("integer {start_frame}"),
                    ));
                }
            }
            previous = Some(start_frame);

            let data = self.required(obj, "data", &here, &read)?;
            out.push(Keyframe::new(start_frame, data));
        }
        Ok(out)
    }

    // Tagged payloads: element count is fixed by the tag.

    fn numbers(
        &self,
        value: &Value,
        at: &Cursor<'_>,
        tag: &str,
        arity: &[usize],
    ) -> Result<Vec<Number>> {
        let items = value.as_array().ok_or_else(|| {
            DecodeError::schema(at.to_path(), "array of numbers", describe(value))
        })?;
        if !arity.contains(&items.len()) {
            return Err(DecodeError::ArityMismatch {
                path: at.to_path(),
                tag: tag.to_string(),
                expected: arity_text(arity),
                found: items.len(),
            });
        }
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.number(item, &at.index(i)))
            .collect()
    }

    fn scalar_payload(&self, value: &Value, at: &Cursor<'_>, tag: &str) -> Result<Number> {
        let n = self.numbers(value, at, tag, &[1])?;
        Ok(n[0])
    }

    fn point_payload(&self, value: &Value, at: &Cursor<'_>, tag: &str) -> Result<Point> {
        let n = self.numbers(value, at, tag, &[2])?;
        Ok(Point::new(n[0], n[1]))
    }

    fn rotation_payload(&self, value: &Value, at: &Cursor<'_>, tag: &str) -> Result<Rotation> {
        let n = self.numbers(value, at, tag, &[1, 3])?;
        Ok(if n.len() == 3 {
            Rotation::with_pivot(n[0], Point::new(n[1], n[2]))
        } else {
            Rotation::planar(n[0])
        })
    }

    fn color_payload(&self, value: &Value, at: &Cursor<'_>, _tag: &str) -> Result<Color> {
        self.color(value, at)
    }

    // Untagged shapes

    fn point(&self, value: &Value, at: &Cursor<'_>) -> Result<Point> {
        match value.as_array() {
            Some(items) if items.len() == 2 => Ok(Point::new(
                self.number(&items[0], &at.index(0))?,
                self.number(&items[1], &at.index(1))?,
            )),
            _ => Err(DecodeError::schema(
                at.to_path(),
                "[number, number]",
                describe(value),
            )),
        }
    }

    fn timing_curve(&self, value: &Value, at: &Cursor<'_>) -> Result<TimingCurve> {
        match value.as_array() {
            Some(items) if items.len() == 2 => Ok(TimingCurve {
                out_tangent: self.point(&items[0], &at.index(0))?,
                in_tangent: self.point(&items[1], &at.index(1))?,
            }),
            _ => Err(DecodeError::schema(
                at.to_path(),
                "[[number, number], [number, number]]",
                describe(value),
            )),
        }
    }

    fn color(&self, value: &Value, at: &Cursor<'_>) -> Result<Color> {
        self.text(value, at).map(Color::from)
    }

    fn line_cap(&self, value: &Value, at: &Cursor<'_>) -> Result<LineCap> {
        let tag = self.text(value, at)?;
        LineCap::from_tag(tag)
            .ok_or_else(|| DecodeError::unknown_variant(at.to_path(), tag, LineCap::TAGS))
    }

    // Primitives

    fn object<'v>(&self, value: &'v Value, at: &Cursor<'_>) -> Result<&'v Object> {
        value
            .as_object()
            .ok_or_else(|| DecodeError::schema(at.to_path(), "object", describe(value)))
    }

    fn array<'v>(&self, value: &'v Value, at: &Cursor<'_>) -> Result<&'v [Value]> {
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| DecodeError::schema(at.to_path(), "array", describe(value)))
    }

    fn text<'v>(&self, value: &'v Value, at: &Cursor<'_>) -> Result<&'v str> {
        value
            .as_str()
            .ok_or_else(|| DecodeError::schema(at.to_path(), "string", describe(value)))
    }

    fn string(&self, value: &Value, at: &Cursor<'_>) -> Result<String> {
        self.text(value, at).map(str::to_string)
    }

    fn integer(&self, value: &Value, at: &Cursor<'_>) -> Result<i64> {
        value
            .as_i64()
            .ok_or_else(|| DecodeError::schema(at.to_path(), "integer", describe(value)))
    }

    fn frame(&self, value: &Value, at: &Cursor<'_>) -> Result<Frame> {
        value
            .as_u64()
            .and_then(|n| Frame::try_from(n).ok())
            .ok_or_else(|| {
                DecodeError::schema(at.to_path(), "non-negative integer", describe(value))
            })
    }

    /// Keeps the spelling: `1` decodes to `Number::Int`, `1.0` to `Number::Float`.
    fn number(&self, value: &Value, at: &Cursor<'_>) -> Result<Number> {
        let n = match value {
            Value::Number(n) => n,
            _ => return Err(DecodeError::schema(at.to_path(), "number", describe(value))),
        };
        if let Some(i) = n.as_i64() {
            Ok(Number::Int(i))
        } else if let Some(u) = n.as_u64() {
            Ok(Number::UInt(u))
        } else {
            n.as_f64()
                .map(Number::Float)
                .ok_or_else(|| DecodeError::schema(at.to_path(), "number", describe(value)))
        }
    }

    fn non_negative(&self, value: &Value, at: &Cursor<'_>) -> Result<Number> {
        let n = self.number(value, at)?;
        if n.as_f64() < 0.0 {
            return Err(DecodeError::schema(at.to_path(), "number >= 0", describe(value)));
        }
        Ok(n)
    }

    fn frame_rate(&self, value: &Value, at: &Cursor<'_>) -> Result<Number> {
        let n = self.number(value, at)?;
        if n.as_f64() <= 0.0 {
            return Err(DecodeError::schema(at.to_path(), "number > 0", describe(value)));
        }
        Ok(n)
    }

    // Field access

    fn required<'v, T>(
        &self,
        obj: &'v Object,
        name: &str,
        at: &Cursor<'_>,
        read: impl FnOnce(&Self, &'v Value, &Cursor<'_>) -> Result<T>,
    ) -> Result<T> {
        let here = at.key(name);
        match obj.get(name) {
            Some(value) => read(self, value, &here),
            None => Err(DecodeError::schema(
                here.to_path(),
                "required field",
                "nothing",
            )),
        }
    }

    fn optional<'v, T>(
        &self,
        obj: &'v Object,
        name: &str,
        at: &Cursor<'_>,
        read: impl FnOnce(&Self, &'v Value, &Cursor<'_>) -> Result<T>,
    ) -> Result<Option<T>> {
        let here = at.key(name);
        obj.get(name).map(|value| read(self, value, &here)).transpose()
    }

    fn list<'v, T>(
        &self,
        value: &'v Value,
        at: &Cursor<'_>,
        mut read: impl FnMut(&Self, &'v Value, &Cursor<'_>) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.array(value, at)?
            .iter()
            .enumerate()
            .map(|(i, item)| read(self, item, &at.index(i)))
            .collect()
    }

    fn check_fields(&self, obj: &Object, at: &Cursor<'_>, known: &[&str]) -> Result<()> {
        for name in obj.keys() {
            if known.contains(&name.as_str()) {
                continue;
            }
            let path = at.key(name).to_path();
            if self.options.deny_unknown_fields {
                return Err(DecodeError::schema(
                    path,
                    format!("one of {}", known.join(", ")),
                    format!("unknown field `{name}`"),
                ));
            }
            tracing::debug!(%path, "skipping unknown field");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts() -> DecodeOptions {
        DecodeOptions::default()
    }

    #[test]
    fn test_describe_shapes() {
        assert_eq!(describe(&json!(null)), "null");
        assert_eq!(describe(&json!(3)), "integer 3");
        assert_eq!(describe(&json!(1.5)), "number 1.5");
        assert_eq!(describe(&json!("a")), "string \"a\"");
        assert_eq!(describe(&json!([1, 2, 3])), "array of length 3");
        assert_eq!(describe(&json!({})), "object");
    }

    #[test]
    fn test_point_wrong_length_is_schema_violation() {
        let o = opts();
        let d = Decoder::new(&o);
        let err = d.point(&json!([1, 2, 3]), &Cursor::Root).unwrap_err();
        assert_eq!(
            err,
            DecodeError::schema(
                crate::FieldPath::root(),
                "[number, number]",
                "array of length 3"
            )
        );
    }

    #[test]
    fn test_rotation_payload_arity() {
        let o = opts();
        let d = Decoder::new(&o);
        let at = Cursor::Root;
        assert_eq!(
            d.rotation_payload(&json!([45]), &at, "ROTATION").unwrap(),
            Rotation::planar(45)
        );
        assert_eq!(
            d.rotation_payload(&json!([45, 10, 20]), &at, "ROTATION").unwrap(),
            Rotation::with_pivot(45, Point::new(10, 20))
        );
        let err = d.rotation_payload(&json!([45, 10]), &at, "ROTATION").unwrap_err();
        assert_eq!(
            err,
            DecodeError::ArityMismatch {
                path: crate::FieldPath::root(),
                tag: "ROTATION".into(),
                expected: "1 or 3".into(),
                found: 2,
            }
        );
    }

    #[test]
    fn test_frame_rejects_negative_and_fractional() {
        let o = opts();
        let d = Decoder::new(&o);
        assert!(d.frame(&json!(-1), &Cursor::Root).is_err());
        assert!(d.frame(&json!(1.5), &Cursor::Root).is_err());
        assert_eq!(d.frame(&json!(12), &Cursor::Root).unwrap(), 12);
    }

    #[test]
    fn test_masking_depth_limit() {
        let o = DecodeOptions::default().with_max_masking_depth(1);
        let d = Decoder::new(&o);
        let value = json!({
            "name": "a", "feature_id": 1,
            "masking": {
                "name": "b", "feature_id": 2,
                "masking": { "name": "c", "feature_id": 3 }
            }
        });
        let err = d.feature(&value, &Cursor::Root, 0).unwrap_err();
        assert_eq!(
            err.path().map(ToString::to_string).as_deref(),
            Some("masking.masking")
        );
    }

    #[test]
    fn test_number_keeps_spelling() {
        let o = opts();
        let d = Decoder::new(&o);
        let at = Cursor::Root;
        assert_eq!(d.number(&json!(1), &at).unwrap(), Number::Int(1));
        assert_eq!(d.number(&json!(1.0), &at).unwrap(), Number::Float(1.0));
        assert_eq!(d.number(&json!(-2), &at).unwrap(), Number::Int(-2));
        assert_eq!(d.number(&json!(u64::MAX), &at).unwrap(), Number::UInt(u64::MAX));
        assert!(d.number(&json!("1"), &at).is_err());
    }

    #[test]
    fn test_unknown_field_policy() {
        let value = json!({ "name": "a", "feature_id": 1, "z_index": 3 });
        let strict = opts();
        let err = Decoder::new(&strict)
            .feature(&value, &Cursor::Root, 0)
            .unwrap_err();
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("z_index"));

        let lenient = DecodeOptions::lenient();
        let feature = Decoder::new(&lenient)
            .feature(&value, &Cursor::Root, 0)
            .unwrap();
        assert_eq!(feature.feature_id, 1);
    }
}
