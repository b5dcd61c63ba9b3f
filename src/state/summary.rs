//! Read-only review of the entered data

use super::RegistrationForm;

/// Summary slots shown on the review step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub username: String,
    pub interests: String,
}

impl Summary {
    /// Project the form's current values into summary slots
    pub fn from_form(form: &RegistrationForm) -> Self {
        let gender = form
            .field("gender")
            .and_then(|f| f.selected())
            .unwrap_or("-");
        let country = form
            .field("country")
            .and_then(|f| f.selected())
            .unwrap_or_default();
        let interests = form
            .field("interests")
            .map(|f| f.checked_values())
            .unwrap_or_default();

        Self {
            name: format!("{} {}", form.text("firstName"), form.text("lastName")),
            date_of_birth: form.text("dateOfBirth").to_string(),
            gender: gender.to_string(),
            email: form.text("email").to_string(),
            phone: form.text("phone").to_string(),
            address: format!("{}, {}, {}", form.text("address"), form.text("city"), country),
            username: form.text("username").to_string(),
            interests: if interests.is_empty() {
                "None selected".to_string()
            } else {
                interests.join(", ")
            },
        }
    }

    /// Labelled rows in display order
    pub fn rows(&self) -> [(&'static str, &str); 8] {
        [
            ("Name", self.name.as_str()),
            ("Date of Birth", self.date_of_birth.as_str()),
            ("Gender", self.gender.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("Address", self.address.as_str()),
            ("Username", self.username.as_str()),
            ("Interests", self.interests.as_str()),
        ]
    }
}
