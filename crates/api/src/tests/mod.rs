// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod contract_tests;
mod department_tests;
mod error_tests;
mod helpers;
mod operations_tests;
mod site_tests;
