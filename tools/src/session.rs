//! Per virtual user session state.
//!
//! Every cached field is either unset or holds the complete result of the
//! latest successful fetch. Nothing is patched in place.

use rand::{Rng, seq::IndexedRandom};
use shop_models::{MyCart, MyOrder, Order, Product, User};

/// `name=value` pair taken from the `Set-Cookie` header of a login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let pair = header.split(';').next()?.trim();
        match pair.split_once('=') {
            Some((name, _)) if !name.trim().is_empty() => {
                Some(Self(pair.to_string()))
            }
            _ => None,
        }
    }

    /// Value for a `Cookie` request header.
    pub fn cookie(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Registered,
    Authenticated,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no user has been registered in this session")]
    NotRegistered,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Option<User>,
    token: Option<SessionToken>,
    products: Option<Vec<Product>>,
    // Memoized once from the first catalog and never recomputed.
    product_names: Option<Vec<String>>,
    cart: Option<MyCart>,
    orders: Option<MyOrder>,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match (&self.user, &self.token) {
            (Some(_), Some(_)) => SessionPhase::Authenticated,
            (Some(_), None) => SessionPhase::Registered,
            _ => SessionPhase::Anonymous,
        }
    }

    /// Starts a fresh session for a newly registered user.
    pub fn register(&mut self, user: User) {
        *self = Self {
            user: Some(user),
            ..Self::default()
        };
    }

    pub fn authenticate(
        &mut self,
        token: SessionToken,
    ) -> Result<(), SessionError> {
        if self.user.is_none() {
            return Err(SessionError::NotRegistered);
        }
        self.token = Some(token);
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase() == SessionPhase::Authenticated
    }

    pub fn store_products(&mut self, products: Vec<Product>) {
        if self.product_names.is_none() {
            self.product_names =
                Some(products.iter().map(|p| p.name.clone()).collect());
        }
        self.products = Some(products);
    }

    pub fn products(&self) -> Option<&[Product]> {
        self.products.as_deref()
    }

    /// Names derived from the first catalog this session saw.
    pub fn product_names(&self) -> &[String] {
        self.product_names.as_deref().unwrap_or_default()
    }

    pub fn store_cart(&mut self, cart: MyCart) {
        self.cart = Some(cart);
    }

    pub fn cart(&self) -> Option<&MyCart> {
        self.cart.as_ref()
    }

    /// Id of the last line in the cached cart, if any.
    pub fn last_cart_item_id(&self) -> Option<i64> {
        self.cart.as_ref()?.last_item()?.id
    }

    pub fn store_orders(&mut self, orders: MyOrder) {
        self.orders = Some(orders);
    }

    pub fn orders(&self) -> Option<&MyOrder> {
        self.orders.as_ref()
    }

    pub fn pick_product<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<&Product> {
        let candidates: Vec<&Product> = self
            .products
            .as_deref()?
            .iter()
            .filter(|p| p.id.is_some())
            .collect();
        candidates.choose(rng).copied()
    }

    pub fn pick_product_name<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Option<&str> {
        self.product_names().choose(rng).map(String::as_str)
    }

    pub fn pick_order<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Order> {
        let candidates: Vec<&Order> = self
            .orders
            .as_ref()?
            .orders()
            .iter()
            .filter(|o| o.id.is_some())
            .collect();
        candidates.choose(rng).copied()
    }

    /// Drops everything, back to an anonymous session.
    pub fn logout(&mut self) {
        *self = Self::default();
    }
}
