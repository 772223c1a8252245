//! Customer voucher login

use super::{ClientError, PublicPortalClient};
use portal_core::{CustomerAuthResponse, CustomerPin};
use reqwest::Method;

impl PublicPortalClient {
    /// Log a customer in with a voucher PIN
    ///
    /// Taking a [`CustomerPin`] means the submit-time check has already passed.
    pub async fn customer_login(
        &self,
        pin: &CustomerPin,
    ) -> Result<CustomerAuthResponse, ClientError> {
        let request = self
            .request(Method::POST, "/vouchers/customers/login")
            .json(&pin.to_body());
        self.execute(request).await
    }
}
