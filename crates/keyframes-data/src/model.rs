use serde::ser::{SerializeSeq, SerializeStruct, SerializeTuple};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub type GroupId = i64;
pub type FeatureId = i64;
pub type Frame = u32;

/// Root of a keyframes animation document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub key: i64,
    pub name: String,
    pub canvas_size: Point,
    pub frame_rate: Number,
    pub animation_frame_count: Frame,
    pub features: Vec<Feature>,
    pub animation_groups: Vec<AnimationGroup>,
}

impl Document {
    pub fn group(&self, id: GroupId) -> Option<&AnimationGroup> {
        self.animation_groups.iter().find(|g| g.group_id == id)
    }

    /// Looks a feature up by id, masking features included.
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features
            .iter()
            .flat_map(|f| std::iter::once(f).chain(f.masks()))
            .find(|f| f.feature_id == id)
    }

    /// Walks the parent chain of a group, nearest parent first.
    /// The group itself is not yielded.
    pub fn ancestors(&self, id: GroupId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.group(id).and_then(|g| g.parent_group),
            remaining: self.animation_groups.len(),
        }
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.animation_frame_count as f64 / self.frame_rate.as_f64()
    }

    pub fn keyframe_count(&self) -> usize {
        let features: usize = self
            .features
            .iter()
            .flat_map(|f| std::iter::once(f).chain(f.masks()))
            .map(Feature::keyframe_count)
            .sum();
        let groups: usize = self
            .animation_groups
            .iter()
            .flat_map(|g| g.animations.iter())
            .map(Property::keyframe_count)
            .sum();
        features + groups
    }
}

pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<GroupId>,
    // Bounds the walk for documents built by hand with a cyclic parent chain.
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a AnimationGroup;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let group = self.doc.group(self.next?)?;
        self.next = group.parent_group;
        Some(group)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationGroup {
    pub group_id: GroupId,
    pub group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group: Option<GroupId>,
    pub animations: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Feature {
    pub name: String,
    pub feature_id: FeatureId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masking: Option<Box<Feature>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backed_image: Option<String>, // Image asset identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_frame: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_frame: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_line_cap: Option<LineCap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effects: Option<Effects>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_trim: Option<PathTrim>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_group: Option<GroupId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_animations: Option<Vec<Property>>,

    // Legacy keyframe encoding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_curves: Option<Vec<TimingCurve>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_frames: Option<Vec<Keyframe<Vec<String>>>>,
}

impl Feature {
    /// The owned masking chain, outermost mask first.
    pub fn masks(&self) -> impl Iterator<Item = &Feature> {
        std::iter::successors(self.masking.as_deref(), |f| f.masking.as_deref())
    }

    /// Whether `frame` falls in the inclusive `from_frame..=to_frame` window.
    /// A missing bound is open.
    pub fn is_visible_at(&self, frame: f64) -> bool {
        self.from_frame.map_or(true, |from| frame >= from.as_f64())
            && self.to_frame.map_or(true, |to| frame <= to.as_f64())
    }

    pub fn properties(&self) -> &[Property] {
        self.feature_animations.as_deref().unwrap_or(&[])
    }

    /// Keyframes owned directly by this feature. Masks are not included.
    pub fn keyframe_count(&self) -> usize {
        let animations: usize = self.properties().iter().map(Property::keyframe_count).sum();
        let gradient = self
            .effects
            .as_ref()
            .and_then(|e| e.gradient.as_ref())
            .map_or(0, Gradient::keyframe_count);
        let trim = self.path_trim.as_ref().map_or(0, PathTrim::keyframe_count);
        let legacy = self.key_frames.as_ref().map_or(0, Vec::len);
        animations + gradient + trim + legacy
    }
}

/// A number as the document wrote it. `1` and `1.0` are kept apart so a
/// decoded document encodes back to the same tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    /// Only for integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::UInt(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    /// Written without a fraction or exponent.
    pub fn is_integer(self) -> bool {
        !matches!(self, Number::Float(_))
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Int(n.into())
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == *other
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::UInt(n) => write!(f, "{n}"),
            Number::Float(n) => write!(f, "{n:?}"),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Int(n) => serializer.serialize_i64(n),
            Number::UInt(n) => serializer.serialize_u64(n),
            Number::Float(n) => serializer.serialize_f64(n),
        }
    }
}

/// `[x, y]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: Number,
    pub y: Number,
}

impl Point {
    pub fn new(x: impl Into<Number>, y: impl Into<Number>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.x)?;
        tuple.serialize_element(&self.y)?;
        tuple.end()
    }
}

/// Color string as written in the document, e.g. `#FF00AA33`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub const TAGS: &'static [&'static str] = &["butt", "round", "square"];

    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Effects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Linear,
    Radial,
}

impl GradientType {
    pub const TAGS: &'static [&'static str] = &["linear", "radial"];

    pub fn as_str(self) -> &'static str {
        match self {
            GradientType::Linear => "linear",
            GradientType::Radial => "radial",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "linear" => Some(GradientType::Linear),
            "radial" => Some(GradientType::Radial),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    pub gradient_type: GradientType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_start: Option<Animatable<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_end: Option<Animatable<Color>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp_start: Option<Animatable<Number>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ramp_end: Option<Animatable<Number>>,
}

impl Gradient {
    pub fn keyframe_count(&self) -> usize {
        self.color_start.as_ref().map_or(0, Animatable::len)
            + self.color_end.as_ref().map_or(0, Animatable::len)
            + self.ramp_start.as_ref().map_or(0, Animatable::len)
            + self.ramp_end.as_ref().map_or(0, Animatable::len)
    }
}

/// Visible portion of a path over time, in percent of its length.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PathTrim {
    #[serde(rename = "path_trim_start", skip_serializing_if = "Option::is_none")]
    pub start: Option<Animatable<Number>>,
    #[serde(rename = "path_trim_end", skip_serializing_if = "Option::is_none")]
    pub end: Option<Animatable<Number>>,
    #[serde(rename = "path_trim_offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<Animatable<Number>>,
}

impl PathTrim {
    pub fn keyframe_count(&self) -> usize {
        [&self.start, &self.end, &self.offset]
            .into_iter()
            .flatten()
            .map(Animatable::len)
            .sum()
    }
}

/// Cubic bezier easing handles between two consecutive keyframes.
/// `[[x1, y1], [x2, y2]]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimingCurve {
    pub out_tangent: Point, // Leaving the earlier keyframe
    pub in_tangent: Point,  // Entering the later keyframe
}

impl Serialize for TimingCurve {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.out_tangent)?;
        tuple.serialize_element(&self.in_tangent)?;
        tuple.end()
    }
}

/// Wire form of a keyframe's `data`. The same Rust type can be written
/// differently depending on where it sits: a scalar track writes `[n]`.
pub trait Payload {
    fn serialize_payload<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>;
}

impl Payload for Number {
    fn serialize_payload<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(self)?;
        seq.end()
    }
}

impl Payload for Point {
    fn serialize_payload<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize(serializer)
    }
}

impl Payload for Color {
    fn serialize_payload<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize(serializer)
    }
}

impl Payload for Vec<String> {
    fn serialize_payload<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.serialize(serializer)
    }
}

struct AsPayload<'a, T>(&'a T);

impl<T: Payload> Serialize for AsPayload<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize_payload(serializer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe<T> {
    pub start_frame: Frame,
    pub data: T,
}

impl<T> Keyframe<T> {
    pub fn new(start_frame: Frame, data: T) -> Self {
        Self { start_frame, data }
    }
}

impl<T: Payload> Serialize for Keyframe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Keyframe", 2)?;
        state.serialize_field("start_frame", &self.start_frame)?;
        state.serialize_field("data", &AsPayload(&self.data))?;
        state.end()
    }
}

/// Keyframes of one value plus the easing curves between them.
/// A well formed animatable has exactly one curve per transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "T: Payload"))]
pub struct Animatable<T> {
    pub timing_curves: Vec<TimingCurve>,
    pub key_values: Vec<Keyframe<T>>,
}

impl<T> Default for Animatable<T> {
    fn default() -> Self {
        Animatable {
            timing_curves: Vec::new(),
            key_values: Vec::new(),
        }
    }
}

impl<T> Animatable<T> {
    pub fn new(timing_curves: Vec<TimingCurve>, key_values: Vec<Keyframe<T>>) -> Self {
        Self {
            timing_curves,
            key_values,
        }
    }

    pub fn len(&self) -> usize {
        self.key_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_values.is_empty()
    }

    /// A single keyframe (or none) never changes over time.
    pub fn is_static(&self) -> bool {
        self.key_values.len() <= 1
    }

    /// First and last `start_frame`.
    pub fn frame_span(&self) -> Option<(Frame, Frame)> {
        let first = self.key_values.first()?.start_frame;
        let last = self.key_values.last()?.start_frame;
        Some((first, last))
    }
}

/// Rotation keyframe payload: an angle, optionally around an explicit pivot.
/// `[degrees]` or `[degrees, pivot_x, pivot_y]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: Number,
    pub pivot: Option<Point>,
}

impl Rotation {
    pub fn planar(degrees: impl Into<Number>) -> Self {
        Self {
            degrees: degrees.into(),
            pivot: None,
        }
    }

    pub fn with_pivot(degrees: impl Into<Number>, pivot: Point) -> Self {
        Self {
            degrees: degrees.into(),
            pivot: Some(pivot),
        }
    }
}

impl Payload for Rotation {
    fn serialize_payload<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.pivot.is_some() { 3 } else { 1 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.degrees)?;
        if let Some(pivot) = &self.pivot {
            seq.serialize_element(&pivot.x)?;
            seq.serialize_element(&pivot.y)?;
        }
        seq.end()
    }
}

/// Tag of a [`Property`]. Serializes as its wire tag so hosts can name
/// properties in their own config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyKind {
    AnchorPoint,
    XPosition,
    YPosition,
    Rotation,
    Scale,
    Opacity,
    StrokeWidth,
    StrokeColor,
    FillColor,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 9] = [
        PropertyKind::AnchorPoint,
        PropertyKind::XPosition,
        PropertyKind::YPosition,
        PropertyKind::Rotation,
        PropertyKind::Scale,
        PropertyKind::Opacity,
        PropertyKind::StrokeWidth,
        PropertyKind::StrokeColor,
        PropertyKind::FillColor,
    ];

    pub const TAGS: &'static [&'static str] = &[
        "ANCHOR_POINT",
        "X_POSITION",
        "Y_POSITION",
        "ROTATION",
        "SCALE",
        "OPACITY",
        "STROKE_WIDTH",
        "STROKE_COLOR",
        "FILL_COLOR",
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::AnchorPoint => "ANCHOR_POINT",
            PropertyKind::XPosition => "X_POSITION",
            PropertyKind::YPosition => "Y_POSITION",
            PropertyKind::Rotation => "ROTATION",
            PropertyKind::Scale => "SCALE",
            PropertyKind::Opacity => "OPACITY",
            PropertyKind::StrokeWidth => "STROKE_WIDTH",
            PropertyKind::StrokeColor => "STROKE_COLOR",
            PropertyKind::FillColor => "FILL_COLOR",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        PropertyKind::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animated property, tagged by `property` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "property", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Property {
    AnchorPoint(Animatable<Point>),
    XPosition(Animatable<Number>),
    YPosition(Animatable<Number>),
    Rotation(Animatable<Rotation>),
    Scale(Animatable<Point>),
    Opacity(Animatable<Number>),
    StrokeWidth(Animatable<Number>),
    StrokeColor(Animatable<Color>),
    FillColor(Animatable<Color>),
}

impl Property {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Property::AnchorPoint(_) => PropertyKind::AnchorPoint,
            Property::XPosition(_) => PropertyKind::XPosition,
            Property::YPosition(_) => PropertyKind::YPosition,
            Property::Rotation(_) => PropertyKind::Rotation,
            Property::Scale(_) => PropertyKind::Scale,
            Property::Opacity(_) => PropertyKind::Opacity,
            Property::StrokeWidth(_) => PropertyKind::StrokeWidth,
            Property::StrokeColor(_) => PropertyKind::StrokeColor,
            Property::FillColor(_) => PropertyKind::FillColor,
        }
    }

    pub fn keyframe_count(&self) -> usize {
        match self {
            Property::AnchorPoint(a) | Property::Scale(a) => a.len(),
            Property::XPosition(a)
            | Property::YPosition(a)
            | Property::Opacity(a)
            | Property::StrokeWidth(a) => a.len(),
            Property::Rotation(a) => a.len(),
            Property::StrokeColor(a) | Property::FillColor(a) => a.len(),
        }
    }

    pub fn timing_curves(&self) -> &[TimingCurve] {
        match self {
            Property::AnchorPoint(a) | Property::Scale(a) => &a.timing_curves,
            Property::XPosition(a)
            | Property::YPosition(a)
            | Property::Opacity(a)
            | Property::StrokeWidth(a) => &a.timing_curves,
            Property::Rotation(a) => &a.timing_curves,
            Property::StrokeColor(a) | Property::FillColor(a) => &a.timing_curves,
        }
    }
}
