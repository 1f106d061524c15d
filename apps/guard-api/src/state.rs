//! 应用共享状态
//!
//! 外部库服务（探测、状态、注册）共用同一个 RemoteDriver；
//! 本地存储按配置选择 PostgreSQL 或内存实现。

use guard_remote::{
    BootstrapDefaults, InMemoryRemoteDriver, LivenessProber, Provisioner, RemoteDriver,
    StatusService,
};
use guard_storage::{ChildStore, InMemoryChildStore, InMemoryUpdateStore, UpdateStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub prober: Arc<LivenessProber>,
    pub status: Arc<StatusService>,
    pub provisioner: Arc<Provisioner>,
    pub child_store: Arc<dyn ChildStore>,
    pub update_store: Arc<dyn UpdateStore>,
}

impl AppState {
    pub fn new(
        driver: Arc<dyn RemoteDriver>,
        defaults: BootstrapDefaults,
        child_store: Arc<dyn ChildStore>,
        update_store: Arc<dyn UpdateStore>,
    ) -> Self {
        Self {
            prober: Arc::new(LivenessProber::new(driver.clone())),
            status: Arc::new(StatusService::new(driver.clone())),
            provisioner: Arc::new(Provisioner::new(driver, defaults)),
            child_store,
            update_store,
        }
    }

    /// 全部使用内存实现（测试与本地演示）。
    pub fn in_memory(driver: Arc<InMemoryRemoteDriver>) -> Self {
        Self::new(
            driver,
            BootstrapDefaults::default(),
            Arc::new(InMemoryChildStore::new()),
            Arc::new(InMemoryUpdateStore::new()),
        )
    }
}
