//! In-process ILS stand-in and app wiring for integration tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use holdings_engine::{
    api,
    config::AppConfig,
    error::GatewayError,
    repository::{Cache, HttpReply, IlsGateway, MemoryCache, Transport, TtlPolicy},
    services::Services,
    AppState,
};

pub const BASE_URL: &str = "http://ils.test/firehose2";

type Reply = Result<HttpReply, GatewayError>;

/// Transport answering from per-URL scripts and recording every call
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
    forms: Mutex<Vec<Vec<(String, String)>>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a reply for `path`; the last reply queued for a path repeats
    pub fn script(&self, path: &str, reply: Reply) {
        self.scripts
            .lock()
            .unwrap()
            .entry(format!("{}{}", BASE_URL, path))
            .or_default()
            .push_back(reply);
    }

    pub fn ok(&self, path: &str, body: &str) {
        self.script(path, Ok(HttpReply::new(200, body)));
    }

    pub fn calls_to(&self, path: &str) -> usize {
        let url = format!("{}{}", BASE_URL, path);
        self.calls.lock().unwrap().iter().filter(|c| **c == url).count()
    }

    pub fn last_form(&self) -> Option<Vec<(String, String)>> {
        self.forms.lock().unwrap().last().cloned()
    }

    fn answer(&self, url: &str) -> Reply {
        self.calls.lock().unwrap().push(url.to_string());
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Ok(HttpReply::new(404, "")),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Reply {
        self.answer(url)
    }

    async fn post(&self, url: &str, form: &[(String, String)]) -> Reply {
        self.forms.lock().unwrap().push(form.to_vec());
        self.answer(url)
    }
}

pub fn ttl() -> TtlPolicy {
    TtlPolicy {
        fast: Duration::from_secs(60),
        user: Duration::from_secs(30),
        list: Duration::from_secs(3600),
    }
}

pub fn gateway(transport: Arc<ScriptedTransport>, store: Arc<MemoryCache>) -> IlsGateway {
    IlsGateway::new(BASE_URL, transport, Cache::new(store, "ils"), ttl())
}

pub fn services(transport: Arc<ScriptedTransport>) -> (Services, Arc<MemoryCache>) {
    let store = Arc::new(MemoryCache::new());
    (Services::new(gateway(transport, store.clone())), store)
}

pub fn app(transport: Arc<ScriptedTransport>) -> axum::Router {
    let (services, _) = services(transport);
    api::create_router(AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services),
    })
}

pub const ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalogItem key="2470431">
  <canHold value="yes"><message>Request this item</message></canHold>
  <status>1</status>
  <holding callNumber="MSS 1234" callSequence="3" holdable="false">
    <copy copyNumber="1" barCode="X0003">
      <circulate>N</circulate>
      <currentLocation code="IN-PROCESS"><name>In Process</name></currentLocation>
      <homeLocation code="SC-IVY"><name>Special Collections Ivy</name></homeLocation>
    </copy>
    <library code="SPEC-COLL"><name>Special Collections</name></library>
    <shelvingKey>MSS 1234</shelvingKey>
  </holding>
  <holding callNumber="PS3545 .I345 Z5 1990" callSequence="1" holdable="true">
    <copy copyNumber="1" barCode="X0001">
      <circulate>Y</circulate>
      <currentLocation code="STACKS"><name>Stacks</name></currentLocation>
      <homeLocation code="STACKS"><name>Stacks</name></homeLocation>
    </copy>
    <copy copyNumber="2" barCode="X0002">
      <circulate>Y</circulate>
      <currentLocation code="LOST-1"><name>Lost</name></currentLocation>
      <homeLocation code="STACKS"><name>Stacks</name></homeLocation>
    </copy>
    <library code="ALDERMAN"><name>Alderman</name><deliverable>true</deliverable></library>
    <shelvingKey>PS 03545.I345 Z5 1990</shelvingKey>
  </holding>
  <holding callNumber="PS3545 .I345 Z5 1990 c.2" callSequence="2" holdable="true">
    <copy copyNumber="1" barCode="X0004">
      <circulate>Y</circulate>
      <currentLocation code="STACKS"><name>Stacks</name></currentLocation>
    </copy>
    <library code="IVY"><name>Ivy Annex</name></library>
    <shelvingKey>PS 03545.I345 Z5 1990 C.2</shelvingKey>
  </holding>
  <holding callNumber="VOID" callSequence="4" holdable="false">
    <copy copyNumber="1" barCode="X0005"><currentLocation code="STACKS"/></copy>
    <library code="ALDERMAN"><name>Alderman</name></library>
  </holding>
</catalogItem>"#;

pub const USER_CHECKOUTS: &str = r#"<user computingId="mst3k" sirsiId="123">
  <displayName>Mike Nelson</displayName>
  <checkout>
    <catalogItem key="2470431">
      <holding callNumber="PS3545 .I345 Z5 1990" callSequence="1"/>
    </catalogItem>
    <dateDue>2026-11-01</dateDue>
  </checkout>
</user>"#;
