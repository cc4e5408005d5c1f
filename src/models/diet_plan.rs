use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::lenient;
use super::validation::{require, require_non_negative, require_url, FormErrors};
use super::Record;
use crate::store::Collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    /// Name of the list field on the stored document.
    pub fn field_name(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }

    /// Singular label used in messages.
    pub fn item_label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            "snack" | "snacks" => Ok(MealSlot::Snacks),
            other => Err(format!("Unknown meal slot: {}", other)),
        }
    }
}

/// One food item within a meal slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "imageUrl", default, deserialize_with = "lenient::string")]
    pub image_url: String,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub carbs: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fat: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub protein: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "dietaryPreference", default, deserialize_with = "lenient::string")]
    pub dietary_preference: String,
    #[serde(default, deserialize_with = "lenient::f64")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub breakfast: Vec<MealEntry>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub lunch: Vec<MealEntry>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub dinner: Vec<MealEntry>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub snacks: Vec<MealEntry>,
}

impl DietPlan {
    pub fn meals(&self, slot: MealSlot) -> &[MealEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    pub fn summary(&self) -> DietPlanSummary {
        DietPlanSummary {
            id: self.id.clone(),
            dietary_preference: self.dietary_preference.clone(),
            calories: self.calories,
        }
    }
}

impl Record for DietPlan {
    const COLLECTION: Collection = Collection::DietPlans;

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Row shown in the diet plan list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlanSummary {
    pub id: String,
    pub dietary_preference: String,
    pub calories: f64,
}

/// Editable meal entry. Values stay raw until the draft is submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealEntryForm {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(rename = "imageUrl", default, deserialize_with = "lenient::string")]
    pub image_url: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub carbs: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub fat: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub protein: String,
}

impl MealEntryForm {
    fn validate_into(&self, errors: &mut FormErrors, prefix: &str) {
        let field = |name: &str| format!("{}.{}", prefix, name);

        require(errors, &field("name"), &self.name, "Name is required");
        require_url(
            errors,
            &field("imageUrl"),
            &self.image_url,
            "Image URL is required",
            "Invalid URL",
        );
        require_non_negative(
            errors,
            &field("calories"),
            self.calories,
            "Calories are required",
            "Calories must be at least 0",
        );
        require(errors, &field("carbs"), &self.carbs, "Carbs are required");
        require(errors, &field("fat"), &self.fat, "Fat is required");
        require(errors, &field("protein"), &self.protein, "Protein is required");
    }

    fn into_entry(self) -> MealEntry {
        MealEntry {
            name: self.name.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            calories: self.calories.unwrap_or_default(),
            carbs: self.carbs.trim().to_string(),
            fat: self.fat.trim().to_string(),
            protein: self.protein.trim().to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("At least one {} item is required", .slot.item_label())]
    LastEntry { slot: MealSlot },
    #[error("No {slot} entry at index {index} (have {len})")]
    IndexOutOfRange {
        slot: MealSlot,
        index: usize,
        len: usize,
    },
}

/// Diet plan form: top-level fields plus one ordered entry list per meal slot.
///
/// A fresh draft starts with a single blank entry in every slot and the
/// editor never lets a slot drop below one entry. Drafts received over the
/// wire may still carry empty slots, which `validate` reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlanDraft {
    #[serde(rename = "dietaryPreference", default, deserialize_with = "lenient::string")]
    pub dietary_preference: String,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub calories: Option<f64>,
    #[serde(default)]
    pub breakfast: Vec<MealEntryForm>,
    #[serde(default)]
    pub lunch: Vec<MealEntryForm>,
    #[serde(default)]
    pub dinner: Vec<MealEntryForm>,
    #[serde(default)]
    pub snacks: Vec<MealEntryForm>,
}

impl Default for DietPlanDraft {
    fn default() -> Self {
        Self {
            dietary_preference: String::new(),
            calories: Some(0.0),
            breakfast: vec![MealEntryForm::default()],
            lunch: vec![MealEntryForm::default()],
            dinner: vec![MealEntryForm::default()],
            snacks: vec![MealEntryForm::default()],
        }
    }
}

impl DietPlanDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: MealSlot) -> &[MealEntryForm] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<MealEntryForm> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Append a blank entry and return its index.
    pub fn append(&mut self, slot: MealSlot) -> usize {
        let entries = self.slot_mut(slot);
        entries.push(MealEntryForm::default());
        entries.len() - 1
    }

    pub fn remove(&mut self, slot: MealSlot, index: usize) -> Result<MealEntryForm, EditError> {
        let entries = self.slot_mut(slot);
        let len = entries.len();

        if index >= len {
            return Err(EditError::IndexOutOfRange { slot, index, len });
        }
        if len == 1 {
            return Err(EditError::LastEntry { slot });
        }

        Ok(entries.remove(index))
    }

    pub fn entry_mut(&mut self, slot: MealSlot, index: usize) -> Option<&mut MealEntryForm> {
        self.slot_mut(slot).get_mut(index)
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        require(
            &mut errors,
            "dietaryPreference",
            &self.dietary_preference,
            "Dietary Preference is required",
        );
        require_non_negative(
            &mut errors,
            "calories",
            self.calories,
            "Calories are required",
            "Calories must be at least 0",
        );

        for slot in MealSlot::ALL {
            let entries = self.slot(slot);
            if entries.is_empty() {
                errors.add(
                    slot.field_name(),
                    format!("At least one {} item is required", slot.item_label()),
                );
                continue;
            }

            for (index, entry) in entries.iter().enumerate() {
                entry.validate_into(&mut errors, &format!("{}.{}", slot.field_name(), index));
            }
        }

        errors.into_result()
    }

    /// Validate and convert into a storable plan (without an id).
    pub fn submit(self) -> Result<DietPlan, FormErrors> {
        self.validate()?;

        let convert = |entries: Vec<MealEntryForm>| -> Vec<MealEntry> {
            entries.into_iter().map(MealEntryForm::into_entry).collect()
        };

        Ok(DietPlan {
            id: String::new(),
            dietary_preference: self.dietary_preference.trim().to_string(),
            calories: self.calories.unwrap_or_default(),
            breakfast: convert(self.breakfast),
            lunch: convert(self.lunch),
            dinner: convert(self.dinner),
            snacks: convert(self.snacks),
        })
    }
}
