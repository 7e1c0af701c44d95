//! Read-side wire shapes and the wire → model transform.

use serde::{Deserialize, Serialize};

use crate::domain::{AllergenSet, DateKey, Meal, MealItem, MealType, Menu};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAllergen {
    pub name: String,
}

/// Join record between a dish and an allergen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireAllergenLink {
    pub allergen: WireAllergen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMealItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub allergens: Vec<WireAllergenLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMeal {
    pub id: u32,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    #[serde(default)]
    pub items: Vec<WireMealItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMenu {
    pub id: u32,
    /// Either "YYYY-MM-DD" or a full timestamp
    pub date: String,
    #[serde(default)]
    pub meals: Vec<WireMeal>,
}

/// The backend reached us with data that breaks a model invariant
fn invalid_payload(err: ClientError) -> ClientError {
    match err {
        ClientError::Validation(msg) => ClientError::decode(format!("invalid payload: {}", msg)),
        other => other,
    }
}

pub fn item_from_wire(item: WireMealItem) -> ClientResult<MealItem> {
    let allergens: AllergenSet = item
        .allergens
        .iter()
        .map(|link| link.allergen.name.as_str())
        .collect();
    MealItem::new(item.id, &item.name, allergens).map_err(invalid_payload)
}

pub fn meal_from_wire(meal: WireMeal) -> ClientResult<Meal> {
    let items = meal
        .items
        .into_iter()
        .map(item_from_wire)
        .collect::<ClientResult<Vec<_>>>()?;
    Meal::new(meal.id, meal.meal_type, items).map_err(invalid_payload)
}

pub fn menu_from_wire(menu: WireMenu) -> ClientResult<Menu> {
    let date = DateKey::from_wire(&menu.date)?;
    let meals = menu
        .meals
        .into_iter()
        .map(meal_from_wire)
        .collect::<ClientResult<Vec<_>>>()?;
    Menu::new(menu.id, date, meals).map_err(invalid_payload)
}

/// The read-side shape the backend would return for this menu
pub fn menu_to_read_wire(menu: &Menu) -> WireMenu {
    use crate::domain::Entity;

    WireMenu {
        id: menu.id(),
        date: menu.date().to_string(),
        meals: menu
            .meals()
            .iter()
            .map(|meal| WireMeal {
                id: meal.id(),
                meal_type: meal.meal_type(),
                items: meal
                    .items()
                    .iter()
                    .map(|item| WireMealItem {
                        id: item.id(),
                        name: item.name().to_string(),
                        allergens: item
                            .allergens()
                            .iter()
                            .map(|name| WireAllergenLink {
                                allergen: WireAllergen {
                                    name: name.to_string(),
                                },
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Entity;
    use serde_json::json;

    fn sample() -> WireMenu {
        serde_json::from_value(json!({
            "id": 5,
            "date": "2024-06-10T00:00:00.000Z",
            "meals": [
                {
                    "id": 2,
                    "type": "lunch",
                    "items": [
                        {
                            "id": 9,
                            "name": "Sopa",
                            "allergens": [
                                { "allergen": { "name": "Gluten" } },
                                { "allergen": { "name": "Apio" } }
                            ]
                        },
                        { "id": 10, "name": "Fruta", "allergens": [] }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_menu_from_wire_flattens_allergens() {
        let menu = menu_from_wire(sample()).unwrap();
        assert_eq!(menu.id(), 5);
        assert_eq!(menu.date().to_string(), "2024-06-10");
        let lunch = menu.meal(MealType::Lunch).unwrap();
        assert_eq!(lunch.id(), 2);
        let soup = lunch.item(9).unwrap();
        assert_eq!(soup.allergens().to_vec(), vec!["Apio".to_string(), "Gluten".to_string()]);
        assert!(lunch.item(10).unwrap().allergens().is_empty());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let wire: WireMenu = serde_json::from_value(json!({
            "id": 1,
            "date": "2024-06-10",
            "meals": [{ "id": 1, "type": "dinner", "items": [{ "id": 1, "name": "Sopa" }] }]
        }))
        .unwrap();
        let menu = menu_from_wire(wire).unwrap();
        assert!(menu.meal(MealType::Dinner).unwrap().item(1).unwrap().allergens().is_empty());
    }

    #[test]
    fn test_invalid_payload_is_service_error() {
        let wire: WireMenu = serde_json::from_value(json!({
            "id": 1,
            "date": "2024-06-10",
            "meals": [
                { "id": 1, "type": "lunch", "items": [] },
                { "id": 2, "type": "lunch", "items": [] }
            ]
        }))
        .unwrap();
        let err = menu_from_wire(wire).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Service);
    }

    #[test]
    fn test_allergen_projection_survives_round_trip() {
        let menu = menu_from_wire(sample()).unwrap();
        let again = menu_from_wire(menu_to_read_wire(&menu)).unwrap();
        assert_eq!(again, menu);
    }
}
