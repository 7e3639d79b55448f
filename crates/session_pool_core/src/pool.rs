use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use crate::contract::PoolRequest;
use crate::error::ConfigurationError;
use crate::factory::SessionFactory;
use crate::key::PoolKey;
use crate::log_sink::LogSink;

/// Sessions keyed by `(profile, region)`, one entry per distinct pair.
#[derive(Debug, Clone)]
pub struct SessionPool<S> {
    sessions: BTreeMap<PoolKey, S>,
}

impl<S> Default for SessionPool<S> {
    fn default() -> Self {
        Self {
            sessions: BTreeMap::new(),
        }
    }
}

impl<S> SessionPool<S> {
    pub fn build<F, P, R>(
        profiles: &[P],
        regions: &[R],
        factory: &F,
        log: &dyn LogSink,
    ) -> Result<Self, ConfigurationError>
    where
        F: SessionFactory<Session = S> + ?Sized,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        build_pool(profiles, regions, factory, log)
    }

    pub fn from_request<F>(
        request: &PoolRequest,
        factory: &F,
        log: &dyn LogSink,
    ) -> Result<Self, ConfigurationError>
    where
        F: SessionFactory<Session = S> + ?Sized,
    {
        build_pool(&request.profiles, &request.regions, factory, log)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, profile: &str, region: &str) -> Option<&S> {
        self.sessions.get(&PoolKey::new(profile, region))
    }

    pub fn contains(&self, profile: &str, region: &str) -> bool {
        self.get(profile, region).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &PoolKey> {
        self.sessions.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PoolKey, S> {
        self.sessions.iter()
    }

    pub fn into_sessions(self) -> BTreeMap<PoolKey, S> {
        self.sessions
    }
}

impl<'a, S> IntoIterator for &'a SessionPool<S> {
    type Item = (&'a PoolKey, &'a S);
    type IntoIter = btree_map::Iter<'a, PoolKey, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.sessions.iter()
    }
}

/// Builds one session per distinct `(profile, region)` pair of the
/// cross-product, calling the factory once per pair.
///
/// Both dimensions are mandatory: an empty `regions` or `profiles` list yields
/// an empty pool. Callers wanting the default profile pass `[""]`. The first
/// factory failure aborts the build and is returned wrapped with its pair.
pub fn build_pool<F, P, R>(
    profiles: &[P],
    regions: &[R],
    factory: &F,
    log: &dyn LogSink,
) -> Result<SessionPool<F::Session>, ConfigurationError>
where
    F: SessionFactory + ?Sized,
    P: AsRef<str>,
    R: AsRef<str>,
{
    let mut sessions: BTreeMap<PoolKey, F::Session> = BTreeMap::new();

    for profile in profiles {
        let profile = profile.as_ref();
        for region in regions {
            let region = region.as_ref();
            let Entry::Vacant(slot) = sessions.entry(PoolKey::new(profile, region)) else {
                continue;
            };
            let session = factory
                .create_session(profile, region, log)
                .map_err(|error| ConfigurationError::for_pair(profile, region, error))?;
            slot.insert(session);
        }
    }

    Ok(SessionPool { sessions })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{json, Value};

    use super::*;
    use crate::log_sink::{DiscardSink, LogLevel};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct FakeSession {
        profile: String,
        region: String,
    }

    struct CountingFactory {
        calls: Mutex<Vec<(String, String)>>,
        fail_on: Option<(String, String)>,
    }

    impl CountingFactory {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(profile: &str, region: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some((profile.to_string(), region.to_string())),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().expect("poisoned mutex").clone()
        }
    }

    impl SessionFactory for CountingFactory {
        type Session = FakeSession;

        fn create_session(
            &self,
            profile: &str,
            region: &str,
            log: &dyn LogSink,
        ) -> Result<FakeSession, ConfigurationError> {
            self.calls
                .lock()
                .expect("poisoned mutex")
                .push((profile.to_string(), region.to_string()));
            log.info("session_created", json!({"profile": profile, "region": region}));

            if let Some((fail_profile, fail_region)) = &self.fail_on {
                if fail_profile == profile && fail_region == region {
                    return Err(ConfigurationError::MissingRegion {
                        profile: profile.to_string(),
                    });
                }
            }

            Ok(FakeSession {
                profile: profile.to_string(),
                region: region.to_string(),
            })
        }
    }

    struct CapturingSink {
        events: Mutex<Vec<String>>,
    }

    impl LogSink for CapturingSink {
        fn record(&self, _level: LogLevel, event: &str, _details: Value) {
            self.events
                .lock()
                .expect("poisoned mutex")
                .push(event.to_string());
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn builds_full_cross_product() {
        let factory = CountingFactory::new();
        let pool = build_pool(
            &["profile1", "profile2", "profile3"],
            &["us-test-1", "us-test-2", "us-test-3"],
            &factory,
            &DiscardSink,
        )
        .expect("pool should build");

        assert_eq!(pool.len(), 9);
        assert_eq!(factory.calls().len(), 9);
        let session = pool.get("profile2", "us-test-3").expect("pair present");
        assert_eq!(session.profile, "profile2");
        assert_eq!(session.region, "us-test-3");

        let sessions = pool.into_sessions();
        assert_eq!(sessions.len(), 9);
    }

    #[test]
    fn empty_region_list_yields_empty_pool() {
        let factory = CountingFactory::new();
        let regions: Vec<String> = Vec::new();
        let pool = build_pool(
            &strings(&["profile1", "profile2", "profile3"]),
            &regions,
            &factory,
            &DiscardSink,
        )
        .expect("pool should build");

        assert!(pool.is_empty());
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn empty_profile_list_yields_empty_pool() {
        let factory = CountingFactory::new();
        let profiles: Vec<String> = Vec::new();
        let pool = build_pool(&profiles, &["us-test-1"], &factory, &DiscardSink)
            .expect("pool should build");

        assert_eq!(pool.len(), 0);
        assert!(factory.calls().is_empty());
    }

    #[test]
    fn duplicate_pairs_collapse_and_construct_once() {
        let factory = CountingFactory::new();
        let pool = build_pool(
            &["profile1", "profile2", "profile2"],
            &["us-test-1", "us-test-2", "us-test-2"],
            &factory,
            &DiscardSink,
        )
        .expect("pool should build");

        let keys: Vec<PoolKey> = pool.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                PoolKey::new("profile1", "us-test-1"),
                PoolKey::new("profile1", "us-test-2"),
                PoolKey::new("profile2", "us-test-1"),
                PoolKey::new("profile2", "us-test-2"),
            ]
        );
        assert_eq!(factory.calls().len(), 4);
    }

    #[test]
    fn identical_inputs_build_identical_key_sets() {
        let profiles = strings(&["profile1", "profile2", "profile2"]);
        let regions = strings(&["us-test-1", "us-test-2"]);

        let first = build_pool(&profiles, &regions, &CountingFactory::new(), &DiscardSink)
            .expect("pool should build");
        let second = build_pool(&profiles, &regions, &CountingFactory::new(), &DiscardSink)
            .expect("pool should build");

        assert_eq!(first.len(), second.len());
        assert!(first.keys().eq(second.keys()));
    }

    #[test]
    fn first_failure_aborts_and_names_the_pair() {
        let factory = CountingFactory::failing_on("profile1", "us-test-2");
        let error = build_pool(
            &["profile1", "profile2"],
            &["us-test-1", "us-test-2", "us-test-3"],
            &factory,
            &DiscardSink,
        )
        .expect_err("build should fail");

        match &error {
            ConfigurationError::Session {
                profile, region, ..
            } => {
                assert_eq!(profile, "profile1");
                assert_eq!(region, "us-test-2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(error.root_cause().code(), "missing_region");
        assert_eq!(
            factory.calls(),
            vec![
                ("profile1".to_string(), "us-test-1".to_string()),
                ("profile1".to_string(), "us-test-2".to_string()),
            ]
        );
    }

    #[test]
    fn log_sink_reaches_every_factory_call() {
        let sink = CapturingSink {
            events: Mutex::new(Vec::new()),
        };
        let pool = SessionPool::build(
            &["", "profile1"],
            &["us-test-1", "us-test-2"],
            &CountingFactory::new(),
            &sink,
        )
        .expect("pool should build");

        assert_eq!(pool.len(), 4);
        assert!(pool.contains("", "us-test-2"));
        let events = sink.events.lock().expect("poisoned mutex").clone();
        assert_eq!(events, vec!["session_created"; 4]);
    }

    #[test]
    fn closures_act_as_factories() {
        let factory = |profile: &str, region: &str, _log: &dyn LogSink| {
            Ok::<_, ConfigurationError>(format!("{profile}@{region}"))
        };
        let request = PoolRequest {
            profiles: strings(&["ops"]),
            regions: strings(&["us-test-1", "us-test-1"]),
        };

        let pool = SessionPool::from_request(&request, &factory, &DiscardSink)
            .expect("pool should build");

        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get("ops", "us-test-1").map(String::as_str), Some("ops@us-test-1"));
    }
}
