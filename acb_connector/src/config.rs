use cpg_common::Secret;
use log::*;

#[derive(Debug, Clone, Default)]
pub struct AcbConfig {
    /// Base URL of the gateway, e.g. `https://api.acb.com.vn`
    pub base_url: String,
    pub client_id: Secret<String>,
    pub client_secret: Secret<String>,
    /// The merchant's beneficiary account that transfers settle into.
    pub merchant_account: String,
    pub merchant_name: String,
}

impl AcbConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("CPG_ACB_BASE_URL").unwrap_or_else(|_| {
            warn!("CPG_ACB_BASE_URL not set, using sandbox default");
            "https://api.sandbox.acb.com.vn".to_string()
        });
        let client_id = Secret::new(std::env::var("CPG_ACB_CLIENT_ID").unwrap_or_else(|_| {
            warn!("CPG_ACB_CLIENT_ID not set, using (probably useless) default");
            "cpg-client".to_string()
        }));
        let client_secret = Secret::new(std::env::var("CPG_ACB_CLIENT_SECRET").unwrap_or_else(|_| {
            warn!("CPG_ACB_CLIENT_SECRET not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        let merchant_account = std::env::var("CPG_ACB_MERCHANT_ACCOUNT").unwrap_or_else(|_| {
            warn!("CPG_ACB_MERCHANT_ACCOUNT not set, using (probably useless) default");
            "0000000000".to_string()
        });
        let merchant_name = std::env::var("CPG_ACB_MERCHANT_NAME").unwrap_or_else(|_| {
            warn!("CPG_ACB_MERCHANT_NAME not set, using default");
            "CAFE PAYMENT GATEWAY".to_string()
        });
        Self { base_url, client_id, client_secret, merchant_account, merchant_name }
    }
}
