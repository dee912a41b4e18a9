/// Ordered list of ingredient fields being filled in.
///
/// The form always holds at least one field so there is somewhere to type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientForm {
    fields: Vec<String>,
}

impl IngredientForm {
    /// Create a form with a single empty field
    pub fn new() -> Self {
        Self {
            fields: vec![String::new()],
        }
    }

    /// Append an empty field and return its index
    pub fn add_field(&mut self) -> usize {
        self.fields.push(String::new());
        self.fields.len() - 1
    }

    /// Set the value of a field. Returns `false` for an unknown index.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.fields.get_mut(index) {
            Some(field) => {
                *field = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove a field.
    ///
    /// Removing the last remaining field empties it instead.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.fields.len() {
            return None;
        }
        if self.fields.len() == 1 {
            return Some(std::mem::take(&mut self.fields[0]));
        }
        Some(self.fields.remove(index))
    }

    /// Reset to a single empty field
    pub fn clear(&mut self) {
        self.fields = vec![String::new()];
    }

    /// All fields, including blank ones
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Value of a field
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Index of the last field
    pub fn last_index(&self) -> usize {
        self.fields.len() - 1
    }

    /// Trimmed, non-blank ingredients in entry order
    pub fn valid_ingredients(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for IngredientForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_has_one_blank_field() {
        let form = IngredientForm::new();
        assert_eq!(form.fields(), &[String::new()]);
        assert!(form.valid_ingredients().is_empty());
    }

    #[test]
    fn test_add_set_and_valid() {
        let mut form = IngredientForm::new();
        assert!(form.set(0, " rice "));
        let idx = form.add_field();
        assert_eq!(idx, 1);
        form.add_field();
        assert!(form.set(2, "beans"));
        assert!(!form.set(9, "nope"));

        assert_eq!(form.valid_ingredients(), vec!["rice", "beans"]);
        assert_eq!(form.get(0), Some(" rice "));
    }

    #[test]
    fn test_remove_keeps_one_field() {
        let mut form = IngredientForm::new();
        form.set(0, "salt");
        form.add_field();
        form.set(1, "pepper");

        assert_eq!(form.remove(0).as_deref(), Some("salt"));
        assert_eq!(form.fields(), &["pepper".to_string()]);
        assert_eq!(form.remove(0).as_deref(), Some("pepper"));
        assert_eq!(form.fields(), &[String::new()]);
        assert_eq!(form.remove(3), None);
    }

    #[test]
    fn test_clear() {
        let mut form = IngredientForm::new();
        form.set(0, "egg");
        form.add_field();
        form.clear();
        assert_eq!(form.fields().len(), 1);
        assert_eq!(form.last_index(), 0);
    }
}
