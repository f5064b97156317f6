//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature). [`InMemoryRecordStore`] implements every
//! driven port over plain vectors so the whole HTTP surface can be exercised
//! without PostgreSQL.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::dev::{ServiceFactory, ServiceRequest};
use actix_web::test::TestRequest;
use actix_web::{App, web};
use argon2::Params;
use async_trait::async_trait;
use chrono::Utc;
use mockable::DefaultClock;
use rust_decimal::Decimal;

use crate::domain::ports::{
    Collection, MenuRepository, OrderRepository, RecordStoreError, StoredCredentials,
    SubscriptionRepository, UserRepository,
};
use crate::domain::{
    CustomOption, NewOrder, NewSubscription, OptionCategory, OptionId, Order, OrderId,
    OrderStatus, PasswordHash, Role, Salad, SaladId, Subscription, SubscriptionId, User, UserId,
};
use crate::Trace;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;

/// Hash `password` with the cheapest Argon2id parameters so tests stay fast.
pub fn hash_password(password: &str) -> PasswordHash {
    let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
        .expect("minimum argon2 parameters are valid");
    PasswordHash::generate_with(password, params).expect("argon2 hashes any password")
}

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Application with the full `/api` surface over `state`.
///
/// Mirrors the production wiring minus the persistent cookie settings.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .configure(configure_api),
        )
}

/// `POST /api/login` request for the given credentials.
pub fn login_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/login")
        .set_json(serde_json::json!({ "email": email, "password": password }))
}

/// Session cookie set by a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

#[derive(Default)]
struct StoreState {
    users: Vec<(User, PasswordHash)>,
    salads: Vec<Salad>,
    options: Vec<CustomOption>,
    orders: Vec<Order>,
    subscriptions: Vec<Subscription>,
    unavailable: HashSet<Collection>,
    dropped: HashSet<Collection>,
}

impl StoreState {
    fn check(&self, collection: Collection) -> Result<(), RecordStoreError> {
        if self.dropped.contains(&collection) {
            return Err(RecordStoreError::missing_collection(collection));
        }
        if self.unavailable.contains(&collection) {
            return Err(RecordStoreError::connection(format!(
                "{collection} is unavailable"
            )));
        }
        Ok(())
    }

    fn require_user(&self, collection: Collection, id: &UserId) -> Result<(), RecordStoreError> {
        if self.users.iter().any(|(user, _)| user.id == *id) {
            Ok(())
        } else {
            Err(RecordStoreError::constraint(
                collection,
                format!("{collection}_user_id_fkey failed"),
            ))
        }
    }
}

/// In-memory record store holding all five collections.
///
/// Clones share the same state. Listings are newest first, matching the
/// PostgreSQL adapters.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use salad_backend::domain::Role;
/// use salad_backend::test_support::InMemoryRecordStore;
///
/// let store = InMemoryRecordStore::new();
/// let user = store.seed_user("ada@example.com", "pw", Role::Customer);
/// let salad = store.seed_salad("Garden", Decimal::new(800, 2));
/// assert_eq!(store.orders().len(), 0);
/// # let _ = (user, salad);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a user with a freshly hashed password. The email keeps the
    /// caller's casing.
    pub fn seed_user(&self, email: &str, password: &str, role: Role) -> User {
        let user = User {
            id: UserId::random(),
            email: email.to_owned(),
            name: email.split('@').next().unwrap_or(email).to_owned(),
            address: None,
            points: 0,
            salad_streak: 0,
            role,
        };
        self.lock()
            .users
            .push((user.clone(), hash_password(password)));
        user
    }

    /// Overwrite a user's loyalty counters.
    pub fn set_loyalty(&self, id: &UserId, points: u32, salad_streak: u32) {
        let mut state = self.lock();
        if let Some((user, _)) = state.users.iter_mut().find(|(user, _)| user.id == *id) {
            user.points = points;
            user.salad_streak = salad_streak;
        }
    }

    /// Delete a user record, leaving any session cookie for it dangling.
    pub fn remove_user(&self, id: &UserId) {
        self.lock().users.retain(|(user, _)| user.id != *id);
    }

    /// Insert a default-menu salad.
    pub fn seed_salad(&self, name: &str, price: Decimal) -> Salad {
        let salad = Salad {
            id: SaladId::random(),
            name: name.to_owned(),
            price,
            ingredients: vec!["lettuce".to_owned(), "tomato".to_owned()],
            image: None,
            is_default: true,
        };
        let mut state = self.lock();
        state.salads.push(salad.clone());
        state.salads.sort_by(|a, b| a.name.cmp(&b.name));
        salad
    }

    /// Insert a custom option.
    pub fn seed_option(
        &self,
        category: OptionCategory,
        name: &str,
        price: Decimal,
        available: bool,
    ) -> CustomOption {
        let option = CustomOption {
            id: OptionId::random(),
            category,
            name: name.to_owned(),
            price,
            available,
        };
        let mut state = self.lock();
        state.options.push(option.clone());
        state
            .options
            .sort_by(|a, b| (a.category, &a.name).cmp(&(b.category, &b.name)));
        option
    }

    /// Make every call touching `collection` fail with a connection error.
    pub fn fail(&self, collection: Collection) {
        self.lock().unavailable.insert(collection);
    }

    /// Make every call touching `collection` report it as missing.
    pub fn drop_collection(&self, collection: Collection) {
        self.lock().dropped.insert(collection);
    }

    /// Every stored order, oldest first.
    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    /// Every stored subscription, oldest first.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.lock().subscriptions.clone()
    }

    /// Force an order into `status`, bypassing the state machine.
    pub fn set_order_status(&self, id: &OrderId, status: OrderStatus) {
        let mut state = self.lock();
        if let Some(order) = state.orders.iter_mut().find(|order| order.id == *id) {
            order.status = status;
        }
    }

    /// HTTP state whose services all run over this store.
    pub fn http_state(&self) -> HttpState {
        let store = Arc::new(self.clone());
        HttpState::from_repositories(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
            store,
            Arc::new(DefaultClock),
        )
    }
}

#[async_trait]
impl MenuRepository for InMemoryRecordStore {
    async fn list_salads(&self) -> Result<Vec<Salad>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::Salads)?;
        Ok(state.salads.clone())
    }

    async fn list_options(&self) -> Result<Vec<CustomOption>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::CustomOptions)?;
        Ok(state.options.clone())
    }

    async fn find_salad(&self, id: &SaladId) -> Result<Option<Salad>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::Salads)?;
        Ok(state.salads.iter().find(|salad| salad.id == *id).cloned())
    }
}

#[async_trait]
impl OrderRepository for InMemoryRecordStore {
    async fn insert(&self, order: &NewOrder) -> Result<Order, RecordStoreError> {
        let mut state = self.lock();
        state.check(Collection::Orders)?;
        state.require_user(Collection::Orders, &order.user_id)?;
        let stored = Order {
            id: OrderId::random(),
            user_id: order.user_id,
            items: order.items.clone(),
            total: order.total,
            status: order.status,
            delivery: order.delivery,
            created: Utc::now(),
        };
        state.orders.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::Orders)?;
        Ok(state
            .orders
            .iter()
            .rev()
            .filter(|order| order.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, id: &OrderId) -> Result<Option<Order>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::Orders)?;
        Ok(state.orders.iter().find(|order| order.id == *id).cloned())
    }

    async fn update_status(
        &self,
        id: &OrderId,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<Order>, RecordStoreError> {
        let mut state = self.lock();
        state.check(Collection::Orders)?;
        Ok(state
            .orders
            .iter_mut()
            .find(|order| order.id == *id && order.status == expected)
            .map(|order| {
                order.status = next;
                order.clone()
            }))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryRecordStore {
    async fn insert(
        &self,
        subscription: &NewSubscription,
    ) -> Result<Subscription, RecordStoreError> {
        let mut state = self.lock();
        state.check(Collection::Subscriptions)?;
        state.require_user(Collection::Subscriptions, &subscription.user_id)?;
        let stored = Subscription {
            id: SubscriptionId::random(),
            user_id: subscription.user_id,
            plan: subscription.plan,
            salads_per_cycle: subscription.salads_per_cycle,
            active: subscription.active,
            next_delivery: subscription.next_delivery,
            created: subscription.created,
        };
        state.subscriptions.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Subscription>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::Subscriptions)?;
        Ok(state
            .subscriptions
            .iter()
            .rev()
            .filter(|sub| sub.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn deactivate(
        &self,
        id: &SubscriptionId,
        owner: &UserId,
    ) -> Result<Option<Subscription>, RecordStoreError> {
        let mut state = self.lock();
        state.check(Collection::Subscriptions)?;
        Ok(state
            .subscriptions
            .iter_mut()
            .find(|sub| sub.id == *id && sub.user_id == *owner)
            .map(|sub| {
                sub.active = false;
                sub.clone()
            }))
    }
}

#[async_trait]
impl UserRepository for InMemoryRecordStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::Users)?;
        Ok(state
            .users
            .iter()
            .find(|(user, _)| user.id == *id)
            .map(|(user, _)| user.clone()))
    }

    async fn find_credentials(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, RecordStoreError> {
        let state = self.lock();
        state.check(Collection::Users)?;
        Ok(state
            .users
            .iter()
            .find(|(user, _)| user.email.to_lowercase() == email.to_lowercase())
            .map(|(user, password_hash)| StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            }))
    }
}
