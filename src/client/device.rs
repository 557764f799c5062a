use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use serde_json::json;

use crate::api::device::{
    FoodLevel, FoodStatus, ProvisionRequest, FEED_PATH, PROVISION_PATH, STATUS_PATH,
};
use crate::api::schedule::{FeedSchedule, SubmitScheduleRequest, SCHEDULE_PATH};
use crate::api::{Ack, FeedAck};

use super::fetch::AuthFetch;
use super::RequestError;

/// Calls that reach the feeder itself.
#[async_trait]
pub trait DeviceApi {
    async fn provision(&self, device_id: &str) -> Result<Ack, RequestError>;
    async fn food_status(&self) -> Result<FoodStatus, RequestError>;
    async fn feed_now(&self) -> Result<FeedAck, RequestError>;
    async fn submit_schedule(&self, entries: &[FeedSchedule]) -> Result<Ack, RequestError>;
}

pub enum UnionDevice {
    Mock(MockDevice),
    Remote(RemoteDevice),
}

#[async_trait]
impl DeviceApi for UnionDevice {
    async fn provision(&self, device_id: &str) -> Result<Ack, RequestError> {
        match self {
            Self::Mock(device) => device.provision(device_id).await,
            Self::Remote(device) => device.provision(device_id).await,
        }
    }

    async fn food_status(&self) -> Result<FoodStatus, RequestError> {
        match self {
            Self::Mock(device) => device.food_status().await,
            Self::Remote(device) => device.food_status().await,
        }
    }

    async fn feed_now(&self) -> Result<FeedAck, RequestError> {
        match self {
            Self::Mock(device) => device.feed_now().await,
            Self::Remote(device) => device.feed_now().await,
        }
    }

    async fn submit_schedule(&self, entries: &[FeedSchedule]) -> Result<Ack, RequestError> {
        match self {
            Self::Mock(device) => device.submit_schedule(entries).await,
            Self::Remote(device) => device.submit_schedule(entries).await,
        }
    }
}

/// Stand-in for a feeder until the backend exposes device endpoints. Every
/// call succeeds with a canned payload and nothing is validated.
#[derive(Debug, Clone, Copy)]
pub struct MockDevice;

impl MockDevice {
    const FOOD_LEVEL: u8 = 90;
    const FEEDS_REMAINING: u32 = 2;
}

#[async_trait]
impl DeviceApi for MockDevice {
    async fn provision(&self, device_id: &str) -> Result<Ack, RequestError> {
        info!("Device '{device_id}' provisioned (mock)");
        Ok(Ack::ok())
    }

    async fn food_status(&self) -> Result<FoodStatus, RequestError> {
        Ok(FoodStatus {
            level: FoodLevel::new(Self::FOOD_LEVEL)?,
            last_feed: Utc::now(),
            feeds_remaining: Self::FEEDS_REMAINING,
        })
    }

    async fn feed_now(&self) -> Result<FeedAck, RequestError> {
        Ok(FeedAck {
            success: true,
            time: Some(Utc::now()),
        })
    }

    async fn submit_schedule(&self, entries: &[FeedSchedule]) -> Result<Ack, RequestError> {
        info!("Schedule submitted (mock): {} entries", entries.len());
        for entry in entries {
            debug!("Schedule entry (mock): {entry:?}");
        }
        Ok(Ack::ok())
    }
}

/// Forwards device calls to the backend over authenticated requests.
#[derive(Clone)]
pub struct RemoteDevice {
    fetch: AuthFetch,
}

impl RemoteDevice {
    pub fn new(fetch: AuthFetch) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl DeviceApi for RemoteDevice {
    async fn provision(&self, device_id: &str) -> Result<Ack, RequestError> {
        let req = ProvisionRequest {
            device_id: device_id.to_string(),
        };
        self.fetch.post(PROVISION_PATH, &req).await
    }

    async fn food_status(&self) -> Result<FoodStatus, RequestError> {
        self.fetch.get(STATUS_PATH).await
    }

    async fn feed_now(&self) -> Result<FeedAck, RequestError> {
        self.fetch.post(FEED_PATH, &json!({})).await
    }

    async fn submit_schedule(&self, entries: &[FeedSchedule]) -> Result<Ack, RequestError> {
        let req = SubmitScheduleRequest { slots: entries };
        self.fetch.post(SCHEDULE_PATH, &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_payloads() {
        let device = MockDevice;

        let status = device.food_status().await.unwrap();
        assert_eq!(status.level.percent(), 90);
        assert_eq!(status.feeds_remaining, 2);

        let ack = device.feed_now().await.unwrap();
        assert!(ack.success);
        assert!(ack.time.is_some());

        assert!(device.provision("feeder-01").await.unwrap().success);
    }
}
