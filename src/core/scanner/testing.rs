// src/core/scanner/testing.rs

//! Scripted resolver and prober doubles used by the classifier and
//! orchestrator tests. Each fake can delay, hang or panic per domain and
//! records how many calls were in flight at once.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::prober::Prober;
use super::resolver::Resolver;
use crate::core::error::ResolutionFailure;
use crate::core::models::{AddressSet, ProbeOutcome};

/// Tracks current and peak concurrency across every call that holds a guard.
#[derive(Debug, Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    pub fn enter(self: &Arc<Self>) -> InFlightGuard {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        InFlightGuard(Arc::clone(self))
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

pub struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.current.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub enum ResolveScript {
    Answer(Vec<IpAddr>),
    Fail(ResolutionFailure),
    Hang,
    Panic,
}

#[derive(Clone)]
pub enum ProbeScript {
    Answer(ProbeOutcome),
    Hang,
}

pub fn ip(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

pub struct FakeResolver {
    scripts: HashMap<String, ResolveScript>,
    fallback: ResolveScript,
    delay: Duration,
    pub in_flight: Arc<InFlight>,
    pub calls: AtomicUsize,
}

impl FakeResolver {
    /// Every domain resolves to 192.0.2.1 unless scripted otherwise.
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: ResolveScript::Answer(vec![ip(192, 0, 2, 1)]),
            delay: Duration::ZERO,
            in_flight: Arc::new(InFlight::default()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, domain: &str, script: ResolveScript) -> Self {
        self.scripts.insert(domain.to_string(), script);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sharing(mut self, in_flight: Arc<InFlight>) -> Self {
        self.in_flight = in_flight;
        self
    }
}

#[async_trait]
impl Resolver for FakeResolver {
    async fn resolve(&self, domain: &str, _timeout: Duration) -> Result<AddressSet, ResolutionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _guard = self.in_flight.enter();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.scripts.get(domain).unwrap_or(&self.fallback).clone() {
            ResolveScript::Answer(ips) => Ok(ips.into()),
            ResolveScript::Fail(failure) => Err(failure),
            ResolveScript::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(ResolutionFailure::Other("hang finished".into()))
            }
            ResolveScript::Panic => panic!("scripted resolver panic for {domain}"),
        }
    }
}

pub struct FakeProber {
    scripts: HashMap<String, ProbeScript>,
    fallback: ProbeScript,
    delay: Duration,
    pub in_flight: Arc<InFlight>,
    pub calls: AtomicUsize,
}

impl FakeProber {
    /// Every domain answers 200 unless scripted otherwise.
    pub fn new() -> Self {
        Self {
            scripts: HashMap::new(),
            fallback: ProbeScript::Answer(ProbeOutcome::Success(200)),
            delay: Duration::ZERO,
            in_flight: Arc::new(InFlight::default()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, domain: &str, script: ProbeScript) -> Self {
        self.scripts.insert(domain.to_string(), script);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn sharing(mut self, in_flight: Arc<InFlight>) -> Self {
        self.in_flight = in_flight;
        self
    }
}

#[async_trait]
impl Prober for FakeProber {
    async fn probe(&self, domain: &str, _addresses: &AddressSet, _timeout: Duration) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _guard = self.in_flight.enter();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.scripts.get(domain).unwrap_or(&self.fallback).clone() {
            ProbeScript::Answer(outcome) => outcome,
            ProbeScript::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                ProbeOutcome::TransportFailure("hang finished".into())
            }
        }
    }
}
