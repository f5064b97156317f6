//! Order placement, history and status services.
//!
//! Totals are priced here from stored menu records. Status changes are
//! conditional on the status that was read, so two admins racing on the same
//! order cannot skip a step.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    AdvanceOrderStatusRequest, MenuRepository, OrderCommand, OrderQuery, OrderRepository,
    PlaceOrderRequest,
};
use crate::domain::{
    CustomizationError, Error, NewOrder, Order, OrderStatus, StatusTransitionError, UserId,
    price_order,
};

/// Service implementing the order driving ports.
#[derive(Clone)]
pub struct OrderService<M, O> {
    menu_repo: Arc<M>,
    order_repo: Arc<O>,
}

impl<M, O> OrderService<M, O> {
    /// Create a new service with the given repositories.
    pub fn new(menu_repo: Arc<M>, order_repo: Arc<O>) -> Self {
        Self {
            menu_repo,
            order_repo,
        }
    }
}

fn customization_error(error: CustomizationError) -> Error {
    let details = match &error {
        CustomizationError::UnknownCategory { category } => json!({
            "field": "custom",
            "value": category,
            "code": "unknown_category",
        }),
        CustomizationError::UnknownOption { category, selector } => json!({
            "field": format!("custom.{category}"),
            "value": selector,
            "code": "unknown_option",
        }),
        CustomizationError::UnavailableOption { category, name } => json!({
            "field": format!("custom.{category}"),
            "value": name,
            "code": "option_unavailable",
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn transition_error(error: StatusTransitionError) -> Error {
    Error::conflict(error.to_string()).with_details(json!({
        "from": error.from.as_str(),
        "to": error.to.as_str(),
        "code": "invalid_transition",
    }))
}

#[async_trait]
impl<M, O> OrderCommand for OrderService<M, O>
where
    M: MenuRepository,
    O: OrderRepository,
{
    async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, Error> {
        let salad = self
            .menu_repo
            .find_salad(&request.salad_id)
            .await?
            .ok_or_else(|| {
                Error::invalid_request("salad does not exist").with_details(json!({
                    "field": "salad_id",
                    "value": request.salad_id.to_string(),
                    "code": "unknown_salad",
                }))
            })?;

        let options = if request.custom.is_empty() {
            Vec::new()
        } else {
            self.menu_repo.list_options().await?
        };
        let priced = price_order(&salad, &options, &request.custom).map_err(customization_error)?;

        let order = self
            .order_repo
            .insert(&NewOrder {
                user_id: request.user_id,
                items: priced.items,
                total: priced.total,
                status: OrderStatus::Pending,
                delivery: request.delivery,
            })
            .await?;

        info!(order_id = %order.id, user_id = %order.user_id, total = %order.total, "order placed");
        Ok(order)
    }

    async fn advance_status(&self, request: AdvanceOrderStatusRequest) -> Result<Order, Error> {
        let AdvanceOrderStatusRequest {
            actor,
            order_id,
            status,
        } = request;
        if !actor.is_admin() {
            return Err(Error::forbidden("admin role required"));
        }

        let current = self
            .order_repo
            .find(&order_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("order {order_id} not found")))?;
        let next = current.status.transition_to(status).map_err(transition_error)?;

        let updated = self
            .order_repo
            .update_status(&order_id, current.status, next)
            .await?
            .ok_or_else(|| {
                Error::conflict("order status changed concurrently").with_details(json!({
                    "expected": current.status.as_str(),
                    "code": "status_changed",
                }))
            })?;

        info!(order_id = %order_id, from = %current.status, to = %next, actor = %actor.id, "order status advanced");
        Ok(updated)
    }
}

#[async_trait]
impl<M, O> OrderQuery for OrderService<M, O>
where
    M: MenuRepository,
    O: OrderRepository,
{
    async fn list_orders(&self, user_id: &UserId) -> Result<Vec<Order>, Error> {
        Ok(self.order_repo.list_for_user(user_id).await?)
    }
}
