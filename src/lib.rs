// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

/*!
Amalgamate the headers of a small C++ library into a single header.

Headers are collected from the flat directories of a [`Layout`], their
license comments, `#pragma once` lines and project-local includes are
dropped, standard includes are deduplicated and hoisted to the top, and
the repeated namespace wrappers are collapsed into one. The result
starts with a generation banner and the license, carries the bootstrap
header verbatim, and is left read-only.

```no_run
use std::path::Path;
use headerbundler::{Amalgamator, Layout};

let amalgamator = Amalgamator::new(Layout::under(Path::new(".")), Path::new("kaizen.h"));
amalgamator.run()?;
# Ok::<(), headerbundler::AmalgamateError>(())
```
*/

mod amalgamator;
pub mod collector;
pub mod compactor;
mod error;
pub mod license;
pub mod parser;

pub use amalgamator::{Amalgamator, Layout};
pub use error::{AmalgamateError, Result};
