// Copyright 2025 JiangLong.
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

//! Ordered label edits applied to object metadata

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelMutation {
    Remove(String),
    Add(String, String),
}

/// One remove followed by one add per key, in the order the keys are given.
pub fn toggle_mutations<S: AsRef<str>>(keys: &[S], value: &str) -> Vec<LabelMutation> {
    keys.iter()
        .flat_map(|key| {
            let key = key.as_ref();
            [
                LabelMutation::Remove(key.to_string()),
                LabelMutation::Add(key.to_string(), value.to_string()),
            ]
        })
        .collect()
}

pub fn apply_mutations(labels: &mut BTreeMap<String, String>, mutations: &[LabelMutation]) {
    for mutation in mutations {
        match mutation {
            LabelMutation::Remove(key) => {
                labels.remove(key);
            }
            LabelMutation::Add(key, value) => {
                labels.insert(key.clone(), value.clone());
            }
        }
    }
}
