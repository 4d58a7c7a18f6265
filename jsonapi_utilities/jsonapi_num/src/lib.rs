// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Creates a [`std::num::NonZeroUsize`] from a literal, in a const context. Passing `0` fails
/// to compile.
///
/// ```
/// use std::num::NonZeroUsize;
/// use jsonapi_num::non_zero_usize;
///
/// const SIZE: NonZeroUsize = non_zero_usize!(16);
/// assert_eq!(SIZE.get(), 16);
/// ```
#[macro_export]
macro_rules! non_zero_usize {
    (0) => {
        compile_error!("Must be non-zero.")
    };
    ($n:literal) => {
        match std::num::NonZeroUsize::new($n) {
            Some(n) => n,
            None => panic!("Must be non-zero."),
        }
    };
}
