//! In-memory collaborators for interpreter tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::Session;
use crate::directory::{self, Catalog, DirectoryError, ServiceDirectory, ServiceRecord};
use crate::display::Display;
use crate::error::{Error, Result};
use crate::group::{Broadcaster, ChatGroup};
use crate::membership::{DirectoryMember, MembershipConfig, MembershipDirectory};
use crate::protocol::{Envelope, Member};

pub const LOGFILE: &str = "/tmp/chat-commander-me.log";

pub fn me() -> Member {
    Member::new("me", "127.0.0.1", "7000", "tcp")
}

pub fn dm(name: &str, ip: &str, port: &str, protocol: &str) -> DirectoryMember {
    DirectoryMember {
        name: name.to_string(),
        ip: ip.to_string(),
        port: port.to_string(),
        protocol: protocol.to_string(),
    }
}

pub fn record(name: &str, url: &str) -> ServiceRecord {
    ServiceRecord {
        name: name.to_string(),
        url: url.to_string(),
        description: format!("{} service", name),
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    lines: Mutex<Vec<String>>,
    quit: AtomicBool,
}

impl RecordingDisplay {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }

    pub fn quit_called(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }
}

impl Display for RecordingDisplay {
    fn display_text(&self, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }

    fn quit(&self) {
        self.quit.store(true, Ordering::SeqCst);
    }
}

type Canned = std::result::Result<Vec<DirectoryMember>, String>;

pub struct FakeMembership {
    pub config: MembershipConfig,
    pub list: Canned,
    pub subscribe: Canned,
    pub unsubscribe: Canned,
    pub reset: Canned,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl Default for FakeMembership {
    fn default() -> Self {
        Self {
            config: MembershipConfig {
                service_url: "http://membership.test".to_string(),
                self_member: (&me()).into(),
            },
            list: Ok(Vec::new()),
            subscribe: Ok(Vec::new()),
            unsubscribe: Ok(Vec::new()),
            reset: Ok(Vec::new()),
            calls: Arc::default(),
        }
    }
}

impl FakeMembership {
    fn answer(&self, call: String, canned: &Canned) -> Result<Vec<DirectoryMember>> {
        self.calls.lock().unwrap().push(call);
        canned.clone().map_err(Error::Membership)
    }
}

#[async_trait]
impl MembershipDirectory for FakeMembership {
    fn config(&self) -> &MembershipConfig {
        &self.config
    }

    async fn list(&self) -> Result<Vec<DirectoryMember>> {
        self.answer("list".to_string(), &self.list)
    }

    async fn subscribe(&self) -> Result<Vec<DirectoryMember>> {
        self.answer("subscribe".to_string(), &self.subscribe)
    }

    async fn unsubscribe(&self) -> Result<Vec<DirectoryMember>> {
        self.answer("unsubscribe".to_string(), &self.unsubscribe)
    }

    async fn reset(&self, service_url: &str) -> Result<Vec<DirectoryMember>> {
        self.answer(format!("reset {}", service_url), &self.reset)
    }
}

pub struct FakeDirectory {
    pub catalog: directory::Result<Catalog>,
    /// Invocation failures keyed by service URL.
    pub failing: HashMap<String, DirectoryError>,
    pub fetches: Arc<Mutex<usize>>,
    pub invocations: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for FakeDirectory {
    fn default() -> Self {
        Self {
            catalog: Ok(Catalog::new()),
            failing: HashMap::new(),
            fetches: Arc::default(),
            invocations: Arc::default(),
        }
    }
}

impl FakeDirectory {
    pub fn with_services(services: &[(&str, ServiceRecord)]) -> Self {
        let catalog = services
            .iter()
            .map(|(id, srv)| (id.to_string(), srv.clone()))
            .collect();
        Self {
            catalog: Ok(catalog),
            ..Default::default()
        }
    }
}

#[async_trait]
impl ServiceDirectory for FakeDirectory {
    async fn catalog(&self) -> directory::Result<Catalog> {
        *self.fetches.lock().unwrap() += 1;
        self.catalog.clone()
    }

    async fn invoke(&self, service: &ServiceRecord, body: &str) -> directory::Result<String> {
        self.invocations
            .lock()
            .unwrap()
            .push((service.url.clone(), body.to_string()));
        match self.failing.get(&service.url) {
            Some(err) => Err(err.clone()),
            None => Ok(format!("reply from {}: {}", service.url, body)),
        }
    }
}

#[derive(Default)]
pub struct FakeBroadcaster {
    pub fail: bool,
    pub sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Broadcaster for FakeBroadcaster {
    async fn send(&self, peer: &Member, _envelope: &Envelope) -> Result<()> {
        if self.fail {
            return Err(Error::Publish(format!("{} unreachable", peer.name)));
        }
        self.sent.lock().unwrap().push(peer.name.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct HarnessBuilder {
    pub membership: FakeMembership,
    pub directory: FakeDirectory,
    pub broadcaster: FakeBroadcaster,
}

impl HarnessBuilder {
    pub fn build(self) -> (Session, Arc<RecordingDisplay>) {
        crate::logging::init_test();
        let display = Arc::new(RecordingDisplay::default());
        let group = ChatGroup::new(me(), Box::new(self.broadcaster));
        let session = Session::new(
            group,
            Box::new(self.membership),
            Box::new(self.directory),
            display.clone(),
            LOGFILE,
        );
        (session, display)
    }
}

pub fn harness() -> (Session, Arc<RecordingDisplay>) {
    HarnessBuilder::default().build()
}
