mod money;
mod secret;

pub mod helpers;

pub use money::{Money, MoneyConversionError, VND_CURRENCY_CODE, VND_CURRENCY_CODE_LOWER};
pub use secret::Secret;
