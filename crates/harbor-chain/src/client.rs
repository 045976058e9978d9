use serde_json::{Value, json};
use tracing::debug;

use crate::types::{CLOCK_OBJECT_ID, ChainError, MoveCall, TransactionResult};

/// HTTP client for the transaction relay. One instance is shared by all
/// request handlers; `reqwest::Client` pools connections internally.
pub struct ChainClient {
    relay_url: String,
    package_id: String,
    http: reqwest::Client,
}

impl ChainClient {
    pub fn new(relay_url: impl Into<String>, package_id: impl Into<String>) -> Self {
        Self {
            relay_url: relay_url.into(),
            package_id: package_id.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Submit one move-call. A transport failure or a non-succeeding relay
    /// verdict is an error; there are no retries here.
    pub async fn submit(&self, call: MoveCall) -> Result<TransactionResult, ChainError> {
        debug!("submitting {}::{} to relay", call.module, call.function);

        let response = self
            .http
            .post(format!("{}/submit", self.relay_url))
            .json(&call)
            .send()
            .await?
            .error_for_status()?;

        let result: TransactionResult = response.json().await?;
        if !result.succeeded {
            return Err(ChainError::Rejected {
                function: format!("{}::{}", call.module, call.function),
                reason: result
                    .error
                    .unwrap_or_else(|| "relay reported failure".to_string()),
            });
        }
        Ok(result)
    }

    fn move_call(&self, module: &str, function: &str, arguments: Vec<Value>) -> MoveCall {
        MoveCall {
            package: self.package_id.clone(),
            module: module.to_string(),
            function: function.to_string(),
            arguments,
        }
    }

    // -- profile --

    pub async fn register_profile(
        &self,
        wallet: &str,
        username: &str,
        display_name: &str,
        bio: &str,
        avatar_cid: &str,
    ) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "profile",
            "register_profile",
            vec![
                json!(wallet),
                json!(username),
                json!(display_name),
                json!(bio),
                json!(avatar_cid),
            ],
        ))
        .await
    }

    pub async fn update_profile(
        &self,
        profile_id: &str,
        new_bio: &str,
    ) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "profile",
            "update_profile",
            vec![json!(profile_id), json!(new_bio)],
        ))
        .await
    }

    // -- messaging --

    pub async fn init_mailbox(&self) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call("messaging_with_nft", "init_mailbox", vec![]))
            .await
    }

    /// The CID travels on-chain as its UTF-8 bytes; the clock object is the
    /// timestamp source.
    pub async fn send_message(
        &self,
        sender_mailbox: &str,
        recipient_mailbox: &str,
        bank_id: &str,
        payment_object: &str,
        cid: &str,
    ) -> Result<TransactionResult, ChainError> {
        let encoded_cid: Vec<u8> = cid.as_bytes().to_vec();
        self.submit(self.move_call(
            "messaging_with_nft",
            "send_message",
            vec![
                json!(sender_mailbox),
                json!(recipient_mailbox),
                json!(bank_id),
                json!(payment_object),
                json!(encoded_cid),
                json!(CLOCK_OBJECT_ID),
            ],
        ))
        .await
    }

    pub async fn delete_message(
        &self,
        mailbox_id: &str,
        message_id: u64,
    ) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "messaging_with_nft",
            "delete_message",
            vec![json!(mailbox_id), json!(message_id)],
        ))
        .await
    }

    pub async fn delete_mailbox(&self, mailbox_id: &str) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "messaging_with_nft",
            "delete_mailbox",
            vec![json!(mailbox_id)],
        ))
        .await
    }

    pub async fn transfer_nft(
        &self,
        recipient: &str,
        nft_id: &str,
    ) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "messaging_with_nft",
            "transfer_nft",
            vec![json!(recipient), json!(nft_id)],
        ))
        .await
    }

    // -- kiosk --

    pub async fn init_kiosk(&self) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call("kiosk", "init_kiosk", vec![]))
            .await
    }

    pub async fn publish_item(
        &self,
        kiosk_id: &str,
        title: &str,
        content_cid: &str,
        price: u64,
    ) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "kiosk",
            "publish_item",
            vec![
                json!(kiosk_id),
                json!(title),
                json!(content_cid),
                json!(price),
            ],
        ))
        .await
    }

    pub async fn delete_item(
        &self,
        kiosk_id: &str,
        item_id: u64,
    ) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "kiosk",
            "delete_item",
            vec![json!(kiosk_id), json!(item_id)],
        ))
        .await
    }

    pub async fn buy_item(
        &self,
        kiosk_id: &str,
        item_id: u64,
        payment_object: &str,
    ) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call(
            "kiosk",
            "buy_item",
            vec![json!(kiosk_id), json!(item_id), json!(payment_object)],
        ))
        .await
    }

    pub async fn withdraw_funds(&self, kiosk_id: &str) -> Result<TransactionResult, ChainError> {
        self.submit(self.move_call("kiosk", "withdraw_funds", vec![json!(kiosk_id)]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ChainClient {
        ChainClient::new("http://relay.invalid", "0xPKG")
    }

    #[test]
    fn move_call_carries_package_module_function() {
        let call = client().move_call("profile", "register_profile", vec![json!("0xA")]);
        assert_eq!(call.package, "0xPKG");
        assert_eq!(call.module, "profile");
        assert_eq!(call.function, "register_profile");
        assert_eq!(call.arguments, vec![json!("0xA")]);
    }

    #[test]
    fn send_message_encodes_cid_bytes_and_clock() {
        // Mirror of the wrapper's argument construction.
        let cid = "Qm123";
        let encoded: Vec<u8> = cid.as_bytes().to_vec();
        let call = client().move_call(
            "messaging_with_nft",
            "send_message",
            vec![
                json!("mbx-sender"),
                json!("mbx-recipient"),
                json!("bank1"),
                json!("0xPAY"),
                json!(encoded),
                json!(CLOCK_OBJECT_ID),
            ],
        );
        assert_eq!(call.arguments[4], json!(vec![81u8, 109, 49, 50, 51]));
        assert_eq!(call.arguments[5], json!("0x6"));
    }
}
