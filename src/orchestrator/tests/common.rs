//! Common test utilities for orchestrator tests.

use std::rc::Rc;

use crate::{
    forge::{
        request::{CreateReleaseRequest, Release, UpdateReleaseRequest},
        traits::MockForge,
    },
    orchestrator::Orchestrator,
    test_helpers::create_test_manager,
};

pub const TEST_BRANCH: &str = "main";

/// Creates a test Orchestrator for [`TEST_BRANCH`] with the provided mock
/// forge. Set expectations on the mock before calling this.
pub fn create_test_orchestrator(mock_forge: MockForge) -> Orchestrator {
    Orchestrator::builder()
        .forge(Rc::new(create_test_manager(mock_forge)))
        .branch(TEST_BRANCH)
        .build()
        .unwrap()
}

/// The release a forge would return for a create request.
pub fn created_from(req: &CreateReleaseRequest) -> Release {
    Release {
        id: 42,
        tag_name: req.tag_name.clone(),
        name: req.name.clone(),
        body: req.body.clone(),
        target_commitish: req.target_commitish.clone(),
        is_draft: req.draft,
        published_at: None,
    }
}

/// The release a forge would return for an update request against a draft
/// targeting [`TEST_BRANCH`].
pub fn updated_from(req: &UpdateReleaseRequest) -> Release {
    Release {
        id: req.release_id,
        tag_name: req.tag_name.clone(),
        name: req.name.clone(),
        body: "existing notes".to_string(),
        target_commitish: TEST_BRANCH.to_string(),
        is_draft: true,
        published_at: None,
    }
}
