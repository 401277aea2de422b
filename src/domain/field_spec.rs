/// Declared type of a form field.
///
/// The type drives both the heuristic parsing strategy and the JSON type
/// the structural schema maps the field to. Unknown labels normalize to
/// `Text`, which the validator treats as a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Boolean,
    Date,
    Select,
    Multiselect,
}

impl FieldType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "select" => Self::Select,
            "multiselect" => Self::Multiselect,
            "textarea" => Self::Textarea,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
        }
    }

    /// JSON type name used when deriving the structural schema.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Multiselect => "array",
            _ => "string",
        }
    }
}

/// One field of a caller-supplied form schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub id: String,
    pub field_type: FieldType,
    pub required: bool,
    pub options: Vec<String>,
    pub description: Option<String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            field_type,
            required: false,
            options: Vec::new(),
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
