use std::cell::Cell;
use std::time::Duration;

use galaksio_galaxy::RetryPolicy;
use proptest::prelude::*;

proptest! {
    #[test]
    fn delays_never_shrink_and_respect_the_cap(
        base_ms in 0u64..5_000,
        cap_ms in 0u64..60_000,
        retry in 1u32..64,
    ) {
        let policy = RetryPolicy::new(5, Duration::from_millis(base_ms), Duration::from_millis(cap_ms));
        let cap = Duration::from_millis(cap_ms.max(base_ms));
        prop_assert!(policy.delay_for(retry) <= policy.delay_for(retry + 1));
        prop_assert!(policy.delay_for(retry) <= cap);
    }

    #[test]
    fn attempts_never_exceed_budget(max_attempts in 0u32..10, fail_first in 0u32..12) {
        let policy = RetryPolicy::new(max_attempts, Duration::ZERO, Duration::ZERO);
        let calls = Cell::new(0u32);
        let outcome = policy.run(
            |attempt| {
                calls.set(calls.get() + 1);
                if attempt <= fail_first { Err("transient") } else { Ok(attempt) }
            },
            |_| true,
        );
        let budget = max_attempts.max(1);
        prop_assert!(calls.get() <= budget);
        prop_assert_eq!(outcome.is_ok(), fail_first < budget);
    }
}
