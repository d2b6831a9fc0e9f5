//! Mock backend for isolating actions in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::backend::{BackendInvoker, BackendRequest, RawResult};

mock! {
    pub Backend {}

    #[async_trait]
    impl BackendInvoker for Backend {
        async fn invoke(&self, request: BackendRequest) -> RawResult;
    }
}
