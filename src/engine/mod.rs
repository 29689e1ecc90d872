mod clock;
mod memory;
mod processor;
mod store;
mod validation;

pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use memory::MemoryThreadSafePaymentStore;
pub use memory::DEMO_PAYMENT_ID;
pub use processor::CardPaymentProcessor;
pub use processor::PaymentProcessor;
pub use store::PaymentStore;
pub use validation::validate;

#[cfg(test)]
pub use processor::MockPaymentProcessor;
#[cfg(test)]
pub use store::MockPaymentStore;
