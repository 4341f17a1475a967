// Copyright 2025 New Vector Ltd.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE files in the repository root for full details.

use rpl_data_model::{PostLogoutRedirectUri, QueryParameter};

/// Build the final redirect location from an accepted URI and the `state` sent
/// by the client.
///
/// Without a `state`, the URI is returned exactly as it was received. With
/// one, the first existing `state` parameter is replaced in place and any
/// further `state` parameter is dropped, or the `state` is appended at the end
/// of the query if there was none. Other parameters keep their raw text and
/// their order.
#[must_use]
pub fn compose(base: &PostLogoutRedirectUri, state: Option<&str>) -> String {
    let Some(state) = state else {
        return base.to_string();
    };

    let mut state = Some(QueryParameter::new("state", state));
    let mut query = Vec::with_capacity(base.query().len() + 1);

    for parameter in base.query() {
        if parameter.key() == "state" {
            // Only the first one is kept
            if let Some(state) = state.take() {
                query.push(state);
            }
        } else {
            query.push(parameter.clone());
        }
    }

    if let Some(state) = state {
        query.push(state);
    }

    base.to_string_with_query(&query)
}
