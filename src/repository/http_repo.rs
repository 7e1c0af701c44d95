//! Menu Repository over HTTP
//!
//! Builds requests, attaches the session's bearer token and funnels every
//! response through [`HttpMenuRepository::execute`], where 401 handling lives.

use async_trait::async_trait;
use std::sync::Arc;

use super::session::Session;
use super::traits::MenuRepository;
use super::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::domain::{
    validate_dish_name, DateKey, Entity, ItemDraft, ItemId, Meal, MealDraft, MealId, MealItem, Menu,
    MenuDraft, MenuId,
};
use crate::error::{ClientError, ClientResult};
use crate::wire::{
    item_draft_to_wire, item_from_wire, meal_draft_to_wire, meal_from_wire, menu_draft_to_wire,
    menu_from_wire, CreateMenuBody, UpdateMenuBody, WireMeal, WireMealItem, WireMenu,
};

const STATUS_UNAUTHORIZED: u16 = 401;
const STATUS_NOT_FOUND: u16 = 404;

pub struct HttpMenuRepository<T: Transport> {
    transport: T,
    session: Arc<Session>,
}

impl<T: Transport> HttpMenuRepository<T> {
    pub fn new(transport: T, session: Arc<Session>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Sends the request with the current bearer token. A 401 from any
    /// operation ends the session here, before the caller sees the response.
    async fn execute(&self, mut request: ApiRequest) -> ClientResult<ApiResponse> {
        request.bearer = self.session.token();
        let label = format!("{} {}", request.method.as_str(), request.path);

        let response = self.transport.send(request).await.map_err(|e| {
            log::error!("API request {} failed: {}", label, e);
            e
        })?;

        if response.status == STATUS_UNAUTHORIZED {
            log::error!("API request {} rejected: unauthorized", label);
            self.session.invalidate();
            return Err(ClientError::SessionExpired);
        }
        if !response.is_success() && response.status != STATUS_NOT_FOUND {
            log::error!("API request {} returned {}: {}", label, response.status, response.body);
        }
        Ok(response)
    }

    fn expect_success(response: ApiResponse) -> ClientResult<ApiResponse> {
        if response.is_success() {
            Ok(response)
        } else {
            Err(ClientError::service(response.status, response.body))
        }
    }

    /// Deletes treat "already gone" as done
    fn expect_deleted(response: ApiResponse) -> ClientResult<()> {
        if response.is_success() || response.status == STATUS_NOT_FOUND {
            Ok(())
        } else {
            Err(ClientError::service(response.status, response.body))
        }
    }

    fn validate_item(item: &ItemDraft) -> ClientResult<()> {
        validate_dish_name(&item.name).map(|_| ())
    }
}

#[async_trait]
impl<T: Transport> MenuRepository for HttpMenuRepository<T> {
    async fn get_by_date(&self, date: &str) -> ClientResult<Option<Menu>> {
        let date = DateKey::parse(date)?;
        let response = self
            .execute(ApiRequest::new(Method::Get, format!("/menus/{}", date)))
            .await?;
        if response.status == STATUS_NOT_FOUND {
            return Ok(None);
        }
        let wire: WireMenu = Self::expect_success(response)?.json()?;
        menu_from_wire(wire).map(Some)
    }

    async fn get_range(&self, start: Option<&str>, end: Option<&str>) -> ClientResult<Vec<Menu>> {
        let start = start.map(DateKey::parse).transpose()?;
        let end = end.map(DateKey::parse).transpose()?;
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ClientError::validation(format!("range starts after it ends ({} > {})", s, e)));
            }
        }

        let mut request = ApiRequest::new(Method::Get, "/menus");
        if let Some(s) = start {
            request = request.with_query("startDate", s.to_string());
        }
        if let Some(e) = end {
            request = request.with_query("endDate", e.to_string());
        }

        let response = Self::expect_success(self.execute(request).await?)?;
        let wire: Vec<WireMenu> = response.json()?;
        wire.into_iter().map(menu_from_wire).collect()
    }

    async fn create(&self, date: &str, draft: &MenuDraft) -> ClientResult<Menu> {
        let date = DateKey::parse(date)?;
        draft.validate()?;
        let body = CreateMenuBody {
            date,
            meals: menu_draft_to_wire(draft),
        };
        let request = ApiRequest::new(Method::Post, "/menus").with_body(&body)?;
        let response = Self::expect_success(self.execute(request).await?)?;
        let menu = menu_from_wire(response.json::<WireMenu>()?)?;
        log::info!("Created menu {} for {}", menu.id(), menu.date());
        Ok(menu)
    }

    async fn update(&self, menu_id: MenuId, draft: &MenuDraft) -> ClientResult<Menu> {
        draft.validate()?;
        let body = UpdateMenuBody {
            meals: menu_draft_to_wire(draft),
        };
        let request = ApiRequest::new(Method::Put, format!("/menus/{}", menu_id)).with_body(&body)?;
        let response = Self::expect_success(self.execute(request).await?)?;
        menu_from_wire(response.json::<WireMenu>()?)
    }

    async fn add_meal_item(&self, menu_id: MenuId, meal_id: MealId, item: &ItemDraft) -> ClientResult<MealItem> {
        Self::validate_item(item)?;
        let request = ApiRequest::new(Method::Post, format!("/menus/{}/meals/{}/items", menu_id, meal_id))
            .with_body(&item_draft_to_wire(item))?;
        let response = Self::expect_success(self.execute(request).await?)?;
        item_from_wire(response.json::<WireMealItem>()?)
    }

    async fn update_meal_item(
        &self,
        menu_id: MenuId,
        meal_id: MealId,
        item_id: ItemId,
        item: &ItemDraft,
    ) -> ClientResult<MealItem> {
        Self::validate_item(item)?;
        let path = format!("/menus/{}/meals/{}/items/{}", menu_id, meal_id, item_id);
        let request = ApiRequest::new(Method::Put, path).with_body(&item_draft_to_wire(item))?;
        let response = Self::expect_success(self.execute(request).await?)?;
        item_from_wire(response.json::<WireMealItem>()?)
    }

    async fn delete_meal_item(&self, menu_id: MenuId, meal_id: MealId, item_id: ItemId) -> ClientResult<()> {
        let path = format!("/menus/{}/meals/{}/items/{}", menu_id, meal_id, item_id);
        let response = self.execute(ApiRequest::new(Method::Delete, path)).await?;
        Self::expect_deleted(response)
    }

    async fn add_meal(&self, menu_id: MenuId, meal: &MealDraft) -> ClientResult<Meal> {
        for item in &meal.items {
            Self::validate_item(item)?;
        }
        let request = ApiRequest::new(Method::Post, format!("/menus/{}/meals", menu_id))
            .with_body(&meal_draft_to_wire(meal))?;
        let response = Self::expect_success(self.execute(request).await?)?;
        meal_from_wire(response.json::<WireMeal>()?)
    }

    async fn delete_menu(&self, menu_id: MenuId) -> ClientResult<()> {
        let response = self
            .execute(ApiRequest::new(Method::Delete, format!("/menus/{}", menu_id)))
            .await?;
        Self::expect_deleted(response)
    }
}
