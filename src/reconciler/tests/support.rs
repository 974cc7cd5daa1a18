/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Shared fixtures: scripted submitters and fixed order generators.

use crate::orderbook::{Order, OrderBookSnapshot, OrderRequest, Side};
use crate::reconciler::{SubmissionFailed, SubmissionOutcome, Submitter};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// `buy=[[1.5,100],[2.0,95]], sell=[[1.0,105],[3.0,110]]`.
pub fn sample_snapshot() -> OrderBookSnapshot {
    OrderBookSnapshot::new(
        vec![Order::new(1.5, 100.0), Order::new(2.0, 95.0)],
        vec![Order::new(1.0, 105.0), Order::new(3.0, 110.0)],
    )
}

/// Generator yielding `1.0 @ 500 + n` for the n-th call.
pub fn counting_generator() -> impl FnMut() -> Order + Send + 'static {
    let mut n = 0.0;
    move || {
        n += 1.0;
        Order::new(1.0, 500.0 + n)
    }
}

/// Generator yielding `orders` in turn, then repeating the last one.
pub fn scripted_generator(orders: Vec<Order>) -> impl FnMut() -> Order + Send + 'static {
    let mut orders = VecDeque::from(orders);
    move || {
        if orders.len() > 1 {
            orders.pop_front().unwrap()
        } else {
            *orders.front().unwrap()
        }
    }
}

#[derive(Default)]
struct Inner {
    outcomes: Mutex<VecDeque<bool>>,
    requests: Mutex<Vec<OrderRequest>>,
    gate: Option<Arc<Semaphore>>,
}

/// Submitter with scripted outcomes and an optional release gate.
///
/// Outcomes are consumed in call order; once exhausted every call succeeds.
/// When gated, each call waits for one permit from [`release`](Self::release).
#[derive(Clone, Default)]
pub struct TestSubmitter {
    inner: Arc<Inner>,
}

impl TestSubmitter {
    /// Succeeds immediately, always.
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Fails immediately, always.
    pub fn rejecting() -> Self {
        Self::scripted(vec![false; 1024])
    }

    /// Immediate outcomes in call order.
    pub fn scripted(outcomes: Vec<bool>) -> Self {
        Self {
            inner: Arc::new(Inner {
                outcomes: Mutex::new(outcomes.into()),
                ..Inner::default()
            }),
        }
    }

    /// Scripted outcomes that only resolve once released.
    pub fn gated(outcomes: Vec<bool>) -> Self {
        Self {
            inner: Arc::new(Inner {
                outcomes: Mutex::new(outcomes.into()),
                requests: Mutex::new(Vec::new()),
                gate: Some(Arc::new(Semaphore::new(0))),
            }),
        }
    }

    /// Lets `n` gated submissions resolve.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(n);
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<OrderRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

impl Submitter for TestSubmitter {
    fn submit(&self, request: OrderRequest) -> impl Future<Output = SubmissionOutcome> + Send {
        self.inner.requests.lock().unwrap().push(request);
        let succeed = self
            .inner
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(true);
        let gate = self.inner.gate.clone();

        async move {
            if let Some(gate) = gate {
                gate.acquire().await.unwrap().forget();
            }
            if succeed {
                SubmissionOutcome::Success { data: request }
            } else {
                SubmissionOutcome::Failure {
                    error: SubmissionFailed::new("backend rejected order"),
                }
            }
        }
    }
}

/// Submitter whose buy submissions panic instead of resolving. Sell
/// submissions succeed immediately.
pub struct PanickingSubmitter;

impl Submitter for PanickingSubmitter {
    fn submit(&self, request: OrderRequest) -> impl Future<Output = SubmissionOutcome> + Send {
        async move {
            if request.side == Side::Buy {
                panic!("backend crashed while posting buy order");
            }
            SubmissionOutcome::Success { data: request }
        }
    }
}
