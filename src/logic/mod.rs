// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Host boundary: submitted rows, command URLs, HTML markup and persistence.

pub mod form;
pub mod html;
pub mod request;
pub mod store;
