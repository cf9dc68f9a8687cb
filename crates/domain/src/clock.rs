//! # Clock（時刻プロバイダ）
//!
//! メール本文に載せる受付時刻を `Utc::now()` の直接呼び出しから切り離す。
//! 本番は [`SystemClock`]、テストは [`FixedClock`] を注入する。

use std::fmt;

use chrono::{DateTime, Utc};

/// 受付時刻の表示形式（例: `2026-10-17 09:30:00 UTC`）
pub const RECEIVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// 受付時刻
///
/// `Display` は [`RECEIVED_AT_FORMAT`] で整形する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReceivedAt(DateTime<Utc>);

impl ReceivedAt {
   pub fn new(at: DateTime<Utc>) -> Self {
      Self(at)
   }

   pub fn as_datetime(&self) -> DateTime<Utc> {
      self.0
   }
}

impl fmt::Display for ReceivedAt {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{}", self.0.format(RECEIVED_AT_FORMAT))
   }
}

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;

   /// 現在時刻を受付時刻として返す
   fn received_at(&self) -> ReceivedAt {
      ReceivedAt::new(self.now())
   }
}

/// システム時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻（テスト用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self(now)
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.0
   }
}

#[cfg(test)]
mod tests {
   use chrono::TimeZone;
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_受付時刻は秒単位でutc表記になる() {
      let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 5, 3).unwrap();

      assert_eq!(ReceivedAt::new(at).to_string(), "2026-10-17 09:05:03 UTC");
   }

   #[test]
   fn test_fixed_clockの受付時刻は注入した時刻になる() {
      let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
      let clock = FixedClock::new(at);

      assert_eq!(clock.received_at(), ReceivedAt::new(at));
      assert_eq!(clock.received_at().as_datetime(), at);
   }

   #[test]
   fn test_system_clockの受付時刻は呼び出し前後の間に収まる() {
      let before = Utc::now();
      let received_at = SystemClock.received_at();
      let after = Utc::now();

      assert!((before..=after).contains(&received_at.as_datetime()));
   }
}
