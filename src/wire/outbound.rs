//! Write-side payloads and the draft → wire transform.
//! Payloads never carry ids; the backend assigns them.

use serde::Serialize;

use crate::domain::{DateKey, ItemDraft, MealDraft, MealType, MenuDraft};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPayload {
    pub name: String,
    pub allergens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealPayload {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub items: Vec<ItemPayload>,
}

/// Body of `POST /menus`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateMenuBody {
    pub date: DateKey,
    pub meals: Vec<MealPayload>,
}

/// Body of `PUT /menus/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMenuBody {
    pub meals: Vec<MealPayload>,
}

pub fn item_draft_to_wire(item: &ItemDraft) -> ItemPayload {
    ItemPayload {
        name: item.name.clone(),
        allergens: item.allergens.to_vec(),
    }
}

pub fn meal_draft_to_wire(meal: &MealDraft) -> MealPayload {
    MealPayload {
        meal_type: meal.meal_type,
        items: meal.items.iter().map(item_draft_to_wire).collect(),
    }
}

pub fn menu_draft_to_wire(draft: &MenuDraft) -> Vec<MealPayload> {
    draft.meals.iter().map(meal_draft_to_wire).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body_uses_flat_allergens() {
        let mut draft = MenuDraft::empty();
        draft
            .add_item(MealType::Breakfast, ItemDraft::new("Tostadas", ["Gluten", "Lácteos"]).unwrap())
            .unwrap();
        let body = CreateMenuBody {
            date: DateKey::parse("2024-06-10").unwrap(),
            meals: menu_draft_to_wire(&draft),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "date": "2024-06-10",
                "meals": [{
                    "type": "breakfast",
                    "items": [{ "name": "Tostadas", "allergens": ["Gluten", "Lácteos"] }]
                }]
            })
        );
    }

    #[test]
    fn test_empty_allergens_and_meals() {
        let body = UpdateMenuBody {
            meals: menu_draft_to_wire(&MenuDraft::empty()),
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "meals": [] }));

        let item = item_draft_to_wire(&ItemDraft::new("Fruta", Vec::<String>::new()).unwrap());
        assert_eq!(serde_json::to_value(&item).unwrap(), json!({ "name": "Fruta", "allergens": [] }));
    }
}
