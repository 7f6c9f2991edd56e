//! Simulated price feed and monitoring loop

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{info, warn};

use crate::arbitrage::OpportunityEvaluator;
use crate::config::{
    self, BASE_PRICE_A, BASE_PRICE_B, PRICE_JITTER_FRACTION, PRICE_SCALE,
};
use crate::errors::{BotError, BotResult};
use crate::monitor::SubscriberRegistry;
use crate::notifier::TelegramNotifier;
use crate::types::{PricePair, PriceScenario, WsMessage};

/// Owns the recurring simulation timer: generates synthetic price pairs,
/// evaluates them, and fans the results out to subscribers.
///
/// Stopped → Running → Stopped; calling `start` while running replaces the
/// timer (restart semantics). Ticks never overlap: a fire that arrives while
/// a tick is still in flight is skipped.
pub struct PriceMonitor {
    evaluator: OpportunityEvaluator,
    registry: Arc<SubscriberRegistry>,
    notifier: Arc<TelegramNotifier>,
    current: RwLock<PricePair>,
    timer: Mutex<Option<JoinHandle<()>>>,
    tick_gate: Mutex<()>,
}

impl PriceMonitor {
    pub fn new(
        evaluator: OpportunityEvaluator,
        registry: Arc<SubscriberRegistry>,
        notifier: Arc<TelegramNotifier>,
    ) -> Self {
        Self {
            evaluator,
            registry,
            notifier,
            current: RwLock::new(PricePair {
                price_a: BASE_PRICE_A,
                price_b: BASE_PRICE_B,
                observed_at: Utc::now(),
            }),
            timer: Mutex::new(None),
            tick_gate: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    /// Cancels any existing timer, runs one tick before returning, then arms
    /// a periodic timer firing every `interval_secs`.
    pub async fn start(self: &Arc<Self>, interval_secs: u32) -> BotResult<()> {
        if interval_secs == 0 {
            return Err(BotError::InvalidInterval {
                seconds: interval_secs,
            });
        }

        let mut timer = self.timer.lock().await;
        if let Some(handle) = timer.take() {
            handle.abort();
        }

        self.tick().await;

        let monitor = Arc::clone(self);
        let period = Duration::from_secs(u64::from(interval_secs));
        *timer = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                monitor.tick().await;
            }
        }));

        info!(interval_secs, "📡 Price monitoring started");
        Ok(())
    }

    /// Cancels the timer; idempotent.
    pub async fn stop(&self) {
        if let Some(handle) = self.timer.lock().await.take() {
            handle.abort();
            info!("📡 Price monitoring stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Last generated pair; the default base prices before the first tick.
    pub async fn current_prices(&self) -> PricePair {
        self.current.read().await.clone()
    }

    /// Bypasses random perturbation and drives the loop with the fixed price
    /// pair configured for `scenario`. Runs the same store+publish sequence
    /// as a timer tick; the timer schedule is unaffected.
    pub async fn inject_scenario(&self, scenario: PriceScenario) {
        let (price_a, price_b) = config::scenario_prices(scenario);
        info!(scenario = scenario.name(), %price_a, %price_b, "Injecting price scenario");

        // Serialize with timer ticks; an injection must not interleave with
        // a tick's write of the current pair.
        let _gate = self.tick_gate.lock().await;
        self.publish_pair(PricePair {
            price_a,
            price_b,
            observed_at: Utc::now(),
        })
        .await;
    }

    async fn tick(&self) {
        // A timer fire landing while the previous tick is still publishing
        // must not race it on the current-price state.
        let _gate = match self.tick_gate.try_lock() {
            Ok(gate) => gate,
            Err(_) => {
                warn!("Tick overlap detected, skipping this fire");
                return;
            }
        };

        let pair = self.next_pair();
        self.publish_pair(pair).await;
    }

    /// Applies independent bounded random perturbations to the two base
    /// prices, quantized to the venue's quote precision.
    fn next_pair(&self) -> PricePair {
        let mut rng = rand::rng();
        let jitter_a = rng.random_range(-PRICE_JITTER_FRACTION..=PRICE_JITTER_FRACTION);
        let jitter_b = rng.random_range(-PRICE_JITTER_FRACTION..=PRICE_JITTER_FRACTION);

        let price_a = perturb(BASE_PRICE_A, jitter_a);
        let price_b = perturb(BASE_PRICE_B, jitter_b);

        PricePair {
            price_a,
            price_b,
            observed_at: Utc::now(),
        }
    }

    async fn publish_pair(&self, pair: PricePair) {
        *self.current.write().await = pair.clone();

        self.registry
            .publish(WsMessage::PriceUpdate(pair.clone()))
            .await;

        match self.evaluator.evaluate(pair.price_a, pair.price_b).await {
            Ok(signal) => {
                if signal.profitable {
                    let notifier = Arc::clone(&self.notifier);
                    let pct = signal.profit_percentage.clone();
                    tokio::spawn(async move {
                        notifier.notify_high_profit(&pct).await;
                    });
                }
                self.registry
                    .publish(WsMessage::ArbitrageOpportunity(signal))
                    .await;
            }
            Err(e) => {
                // A bad tick must never unseat the timer.
                warn!("Tick evaluation failed: {e}");
            }
        }
    }
}

fn perturb(base: Decimal, jitter: f64) -> Decimal {
    let factor = Decimal::from_f64(jitter).unwrap_or(Decimal::ZERO);
    (base + base * factor).round_dp(PRICE_SCALE)
}
