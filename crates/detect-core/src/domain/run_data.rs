//! Final activation state handed from boot to the run phase.

use super::{PhoneHomeManager, Product, ProductConnection};

static INACTIVE: ProductRunState = ProductRunState::Inactive;

/// Activation state of one product for this run.
#[derive(Debug, Clone)]
pub enum ProductRunState {
    /// Not used: skipped by the operator, or its connectivity check failed and failures
    /// are ignored.
    Inactive,
    /// Used without a server connection.
    Offline,
    /// Used with a verified connection.
    Online(ProductConnection),
}

impl ProductRunState {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

/// Immutable per-product activation record built exactly once by
/// `ProductBoot`.
#[derive(Debug, Clone)]
pub struct ProductRunData {
    states: Vec<(Product, ProductRunState)>,
    phone_home: Option<PhoneHomeManager>,
}

impl ProductRunData {
    /// Build run data from states in boot order.
    pub const fn new(states: Vec<(Product, ProductRunState)>) -> Self {
        Self {
            states,
            phone_home: None,
        }
    }

    /// Attach the phone-home handle created after boot.
    #[must_use]
    pub fn with_phone_home(mut self, phone_home: Option<PhoneHomeManager>) -> Self {
        self.phone_home = phone_home;
        self
    }

    /// State of `product`; products absent from the boot plan are inactive.
    pub fn state(&self, product: Product) -> &ProductRunState {
        self.states
            .iter()
            .find(|(p, _)| *p == product)
            .map_or(&INACTIVE, |(_, state)| state)
    }

    pub fn should_use(&self, product: Product) -> bool {
        self.state(product).is_active()
    }

    pub fn should_use_black_duck(&self) -> bool {
        self.should_use(Product::BlackDuck)
    }

    pub fn should_use_polaris(&self) -> bool {
        self.should_use(Product::Polaris)
    }

    pub fn is_online(&self, product: Product) -> bool {
        matches!(self.state(product), ProductRunState::Online(_))
    }

    /// Connection of an online product.
    pub fn connection(&self, product: Product) -> Option<&ProductConnection> {
        match self.state(product) {
            ProductRunState::Online(connection) => Some(connection),
            ProductRunState::Inactive | ProductRunState::Offline => None,
        }
    }

    /// Active products in boot order.
    pub fn active_products(&self) -> Vec<Product> {
        self.states
            .iter()
            .filter(|(_, state)| state.is_active())
            .map(|(product, _)| *product)
            .collect()
    }

    pub fn states(&self) -> &[(Product, ProductRunState)] {
        &self.states
    }

    pub const fn phone_home(&self) -> Option<&PhoneHomeManager> {
        self.phone_home.as_ref()
    }
}
