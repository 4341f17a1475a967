// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

//! Logging of errors returned by route handlers

/// Record an error returned by a handler.
///
/// Errors are logged at the `error` level by default. Passing `!` as a second
/// argument logs at the `warn` level instead, which is meant for errors caused
/// by the client. A pattern can also be given, in which case only errors
/// matching it are logged as `error`, everything else as `warn`:
///
/// ```ignore
/// record_error!(self, Self::Internal(_));
/// ```
#[macro_export]
macro_rules! record_error {
    ($error:expr, !) => {{
        $crate::__private::tracing::warn!(message = &$error as &dyn ::std::error::Error);
    }};

    ($error:expr) => {{
        $crate::__private::tracing::error!(message = &$error as &dyn ::std::error::Error);
    }};

    ($error:expr, $pattern:pat) => {
        if let $pattern = $error {
            $crate::record_error!($error)
        } else {
            $crate::record_error!($error, !)
        }
    };
}
