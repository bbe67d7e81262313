use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, Timelike};

use crate::state::Delta;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeLeft {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeLeft {
    pub fn display(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Time remaining until the next exact hour boundary after `now`.
pub fn time_until_next_hour(now: NaiveDateTime) -> TimeLeft {
    let Some(hour_start) = now
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
    else {
        return TimeLeft::default();
    };
    let target = hour_start + ChronoDuration::hours(1);
    let diff_ms = (target - now).num_milliseconds().max(0);

    TimeLeft {
        hours: ((diff_ms / (1000 * 60 * 60)) % 24) as u32,
        minutes: ((diff_ms / (1000 * 60)) % 60) as u32,
        seconds: ((diff_ms / 1000) % 60) as u32,
    }
}

pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Running ticker. Dropping the handle stops it.
pub struct CountdownHandle {
    stop_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Cancel the ticker and wait for its thread. Later calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn spawn_countdown(tx: Sender<Delta>) -> CountdownHandle {
    spawn_countdown_with(tx, TICK, local_now)
}

/// Emits one value right away, then one per `interval`, each recomputed from
/// `clock` so scheduling jitter never accumulates.
pub fn spawn_countdown_with(
    tx: Sender<Delta>,
    interval: Duration,
    clock: fn() -> NaiveDateTime,
) -> CountdownHandle {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let join = thread::spawn(move || {
        loop {
            if tx
                .send(Delta::Countdown(time_until_next_hour(clock())))
                .is_err()
            {
                return;
            }
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    });
    CountdownHandle {
        stop_tx: Some(stop_tx),
        join: Some(join),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|d| d.and_hms_milli_opt(h, m, s, ms))
            .expect("valid test time")
    }

    #[test]
    fn exact_hour_waits_a_full_hour() {
        let left = time_until_next_hour(at(9, 0, 0, 0));
        assert_eq!(
            left,
            TimeLeft {
                hours: 1,
                minutes: 0,
                seconds: 0
            }
        );
        assert_eq!(left.display(), "01:00:00");
    }

    #[test]
    fn sub_second_remainder_floors() {
        let left = time_until_next_hour(at(23, 59, 59, 250));
        assert_eq!(left.display(), "00:00:00");
    }
}
