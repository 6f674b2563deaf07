use crate::error::PipelineError;
use crate::object_detection::object_detection_utils::read_classes_txt_file;
use std::borrow::Cow;
use std::path::Path;

/// Resolves the numeric class ids a model emits to human readable names.
pub trait ClassNameLookup {
    fn name_of(&self, class_id: usize) -> Cow<'_, str>;
}

/// A class table where the line index is the class id.
///
/// Ids outside the table resolve to their decimal string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    pub fn new(names: Vec<String>) -> Self {
        ClassNames { names }
    }

    pub fn from_txt_file(filepath: &Path) -> Result<Self, PipelineError> {
        let names = read_classes_txt_file(filepath).map_err(|err| {
            PipelineError::ModelUnavailable(format!("cannot read class names {:?}: {}", filepath, err))
        })?;
        Ok(ClassNames::new(names))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ClassNameLookup for ClassNames {
    fn name_of(&self, class_id: usize) -> Cow<'_, str> {
        match self.names.get(class_id) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(class_id.to_string()),
        }
    }
}
