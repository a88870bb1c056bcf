//! Interaction controller for a single tree view.
//!
//! Owns the transient view state (hover target, the one open form, spouse
//! search) and is the only component that sends mutations to the backend.
//! Every successful mutation is followed by a full refetch, so the view
//! always shows a server-confirmed snapshot; a failed mutation leaves every
//! piece of local state untouched.

use chrono::NaiveDate;

use crate::api::ApiClient;
use crate::auth::{AccessSet, Session};
use crate::errors::ClientError;
use crate::models::{
    CreateNodeRequest, CreateTempUserRequest, CreateTreeRequest, PairSpouseRequest, Person,
    TreeInfo, TreeList, TreeSnapshot, TreeSummary, UpdateNodeRequest,
};
use crate::store::NodeStore;
use crate::tree::{self, RenderNode};

/// Loaded snapshot of the viewed tree with its derived indices, rebuilt
/// wholesale on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeState {
    pub info: TreeInfo,
    pub store: NodeStore,
    pub access: AccessSet,
}

/// A spouse-search hit resolved to that user's node in the viewed tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SpouseCandidate {
    pub node_id: String,
    pub full_name: String,
    pub user_name: String,
}

/// The one open form. A single value rather than independent flags, so two
/// modals can never be open at once.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Idle,
    /// Add a child under `parent`, or fill the root slot when `parent` is
    /// `None`.
    AddNode { parent: Option<String> },
    EditNode { node_id: String },
    AddSpouse {
        node_id: String,
        query: String,
        candidates: Vec<SpouseCandidate>,
        /// Node id of the chosen candidate.
        selected: Option<String>,
        marriage_date: String,
    },
}

/// Person half of the add-node form: an existing user picked from search,
/// or a brand-new placeholder to create first.
#[derive(Debug, Clone)]
pub enum PersonInput {
    Existing {
        user_id: String,
    },
    New {
        full_name: String,
        bio: String,
        home_town: String,
    },
}

/// Node half of the add/edit forms, held the way form fields hold them.
/// Empty strings mean "not set" and are normalized before transmission.
#[derive(Debug, Clone, Default)]
pub struct NodeDetails {
    pub gender: bool,
    pub birth_date: String,
    pub death_date: String,
    pub spouse: String,
    pub marriage_date: String,
}

/// Which controls to offer for one node. Hover reveals them in the UI; an
/// unauthorized node gets none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeControls {
    pub edit: bool,
    pub add_child: bool,
    pub add_spouse: bool,
    pub delete: bool,
}

/// Controller for one tree view.
pub struct TreeView {
    api: ApiClient,
    session: Session,
    tree_id: String,
    state: Option<TreeState>,
    form: FormState,
    hovered: Option<String>,
    /// True while a mutation round-trip is in flight; rejects duplicates.
    busy: bool,
    /// Bumped on cancel so a response landing after the form closed is not
    /// applied to it.
    epoch: u64,
}

impl TreeView {
    pub fn new(api: ApiClient, session: Session, tree_id: impl Into<String>) -> Self {
        Self {
            api,
            session,
            tree_id: tree_id.into(),
            state: None,
            form: FormState::Idle,
            hovered: None,
            busy: false,
            epoch: 0,
        }
    }

    /// Fetch the tree and rebuild the derived state.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let snapshot = self.api.fetch_tree(&self.tree_id).await?;
        self.hydrate(snapshot);
        Ok(())
    }

    /// Rebuild store and access set from an already-fetched snapshot.
    pub fn hydrate(&mut self, snapshot: TreeSnapshot) {
        let store = NodeStore::from_nodes(snapshot.tree_nodes);
        let access = AccessSet::resolve(&store, &snapshot.tree_info, self.session.viewer_id());
        tracing::info!(
            tree = %snapshot.tree_info.id,
            nodes = store.len(),
            full_access = access.full_access(),
            "Tree snapshot applied"
        );
        self.state = Some(TreeState {
            info: snapshot.tree_info,
            store,
            access,
        });
    }

    pub fn state(&self) -> Option<&TreeState> {
        self.state.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Hover tracking stays live even while a mutation is in flight.
    pub fn set_hover(&mut self, node_id: Option<&str>) {
        self.hovered = node_id.map(str::to_string);
    }

    /// Compose the renderable tree; `None` means the root slot is empty and
    /// the view should offer root creation.
    pub fn compose(&self) -> Option<RenderNode> {
        let state = self.state.as_ref()?;
        tree::compose(&state.store, state.info.root_node.as_deref())
    }

    /// The tree as text lines: name first, then the outline or the no-root
    /// placeholder.
    pub fn render_outline(&self) -> Vec<String> {
        let Some(state) = &self.state else {
            return vec!["Tree is not loaded.".to_string()];
        };
        let mut lines = vec![state.info.name.clone()];
        match tree::compose(&state.store, state.info.root_node.as_deref()) {
            Some(root) => lines.extend(tree::outline(&root, &state.access)),
            None => lines.push("No root person yet. Add one to start the tree.".to_string()),
        }
        lines
    }

    /// Which controls to offer for the given node.
    pub fn controls_for(&self, node_id: &str) -> NodeControls {
        let Some(state) = &self.state else {
            return NodeControls::default();
        };
        let Some(node) = state.store.get(node_id) else {
            return NodeControls::default();
        };
        if !state.access.allows(node_id) {
            return NodeControls::default();
        }

        let full = state.access.full_access();
        // "Add child" is offered along the viewer's own descendant chain:
        // the designated root qualifies, otherwise the parent must be
        // authorized too. Parentless nodes off the root (spouses married in)
        // are not on any chain.
        let direct = match &node.parent_node {
            None => state.info.root_node.as_deref() == Some(node_id),
            Some(parent) => state.access.allows(parent),
        };

        NodeControls {
            edit: true,
            delete: true,
            add_child: full || direct,
            add_spouse: full || state.store.spouse_of(node).is_none(),
        }
    }

    // ---- Form transitions -------------------------------------------------

    pub fn open_add_form(&mut self, parent_node_id: &str) -> Result<(), ClientError> {
        let authorized = self
            .state
            .as_ref()
            .map(|s| s.store.contains(parent_node_id) && s.access.allows(parent_node_id))
            .unwrap_or(false);
        if !authorized {
            return Err(ClientError::NotPermitted(
                "You may not add children under this person".to_string(),
            ));
        }
        self.form = FormState::AddNode {
            parent: Some(parent_node_id.to_string()),
        };
        Ok(())
    }

    /// Open the add form for the root slot. Only valid while the tree has no
    /// composable root.
    pub fn open_root_form(&mut self) -> Result<(), ClientError> {
        if self.state.is_none() {
            return Err(ClientError::Validation("Tree is not loaded".to_string()));
        }
        if self.compose().is_some() {
            return Err(ClientError::Validation(
                "This tree already has a root".to_string(),
            ));
        }
        self.form = FormState::AddNode { parent: None };
        Ok(())
    }

    pub fn open_edit_form(&mut self, node_id: &str) -> Result<(), ClientError> {
        if !self.controls_for(node_id).edit {
            return Err(ClientError::NotPermitted(
                "You may not edit this person".to_string(),
            ));
        }
        self.form = FormState::EditNode {
            node_id: node_id.to_string(),
        };
        Ok(())
    }

    pub fn open_spouse_form(&mut self, node_id: &str) -> Result<(), ClientError> {
        if !self.controls_for(node_id).add_spouse {
            return Err(ClientError::NotPermitted(
                "You may not add a spouse for this person".to_string(),
            ));
        }
        self.form = FormState::AddSpouse {
            node_id: node_id.to_string(),
            query: String::new(),
            candidates: Vec::new(),
            selected: None,
            marriage_date: String::new(),
        };
        Ok(())
    }

    /// Close the open form, discarding all pending local edits. Any response
    /// still in flight for it will be ignored when it lands.
    pub fn cancel(&mut self) {
        self.form = FormState::Idle;
        self.epoch += 1;
    }

    // ---- Spouse search ----------------------------------------------------

    /// Search-as-you-type inside the spouse form. An empty query issues no
    /// request and clears stale candidates; hits are narrowed to users who
    /// own a node in this tree.
    pub async fn set_spouse_query(&mut self, query: &str) -> Result<(), ClientError> {
        let FormState::AddSpouse { node_id, .. } = &self.form else {
            return Err(ClientError::Validation(
                "No spouse form is open".to_string(),
            ));
        };
        let own_node = node_id.clone();

        if query.is_empty() {
            if let FormState::AddSpouse {
                query: q,
                candidates,
                selected,
                ..
            } = &mut self.form
            {
                q.clear();
                candidates.clear();
                *selected = None;
            }
            return Ok(());
        }

        let users = self.api.search_users(query).await?;

        let Some(state) = &self.state else {
            return Err(ClientError::Validation("Tree is not loaded".to_string()));
        };
        let resolved: Vec<SpouseCandidate> = users
            .iter()
            .filter_map(|user| {
                let node = state.store.node_of_user(&user.id)?;
                if node.id == own_node {
                    return None;
                }
                Some(SpouseCandidate {
                    node_id: node.id.clone(),
                    full_name: user.full_name.clone(),
                    user_name: user.user_name.clone(),
                })
            })
            .collect();

        // The form may have been closed while the search was in flight; in
        // that case the results are stale and dropped.
        if let FormState::AddSpouse {
            node_id,
            query: q,
            candidates,
            selected,
            ..
        } = &mut self.form
        {
            if *node_id == own_node {
                *q = query.to_string();
                if let Some(sel) = selected.as_ref() {
                    if !resolved.iter().any(|c| &c.node_id == sel) {
                        *selected = None;
                    }
                }
                *candidates = resolved;
            }
        }
        Ok(())
    }

    /// Narrow the spouse form to one candidate.
    pub fn select_spouse(&mut self, candidate_node_id: &str) -> Result<(), ClientError> {
        let FormState::AddSpouse {
            candidates,
            selected,
            ..
        } = &mut self.form
        else {
            return Err(ClientError::Validation(
                "No spouse form is open".to_string(),
            ));
        };
        if !candidates.iter().any(|c| c.node_id == candidate_node_id) {
            return Err(ClientError::Validation(
                "Selected spouse is not among the search results".to_string(),
            ));
        }
        *selected = Some(candidate_node_id.to_string());
        Ok(())
    }

    pub fn set_marriage_date(&mut self, date: &str) -> Result<(), ClientError> {
        normalize_date(date)?;
        let FormState::AddSpouse { marriage_date, .. } = &mut self.form else {
            return Err(ClientError::Validation(
                "No spouse form is open".to_string(),
            ));
        };
        *marriage_date = date.trim().to_string();
        Ok(())
    }

    // ---- Mutations --------------------------------------------------------

    /// Submit the open add form. A brand-new person is first created as a
    /// placeholder user, then the node referencing it; the two steps are not
    /// atomic, so a node failure after user creation leaves an orphan user,
    /// which is logged and surfaced.
    pub async fn submit_add(
        &mut self,
        person: PersonInput,
        details: NodeDetails,
    ) -> Result<(), ClientError> {
        let FormState::AddNode { parent } = &self.form else {
            return Err(ClientError::Validation("No add form is open".to_string()));
        };
        let parent = parent.clone();

        let epoch = self.begin_mutation("add node")?;
        let result = self.perform_add(parent, person, details).await;
        self.conclude(epoch, result, true).await
    }

    async fn perform_add(
        &self,
        parent: Option<String>,
        person: PersonInput,
        details: NodeDetails,
    ) -> Result<(), ClientError> {
        let state = self
            .state
            .as_ref()
            .ok_or_else(|| ClientError::Validation("Tree is not loaded".to_string()))?;

        let birth_date = require_date(&details.birth_date, "Birth date")?;
        let death_date = normalize_date(&details.death_date)?;
        let marriage_date = normalize_date(&details.marriage_date)?;
        let spouse = normalize_id(&details.spouse);

        let (user_id, created_placeholder) = match person {
            PersonInput::Existing { user_id } => (user_id, false),
            PersonInput::New {
                full_name,
                bio,
                home_town,
            } => {
                if full_name.trim().is_empty() {
                    return Err(ClientError::Validation(
                        "Full name is required".to_string(),
                    ));
                }
                let user = self
                    .api
                    .create_temp_user(&CreateTempUserRequest {
                        full_name: full_name.trim().to_string(),
                        bio,
                        home_town,
                    })
                    .await?;
                (user.id, true)
            }
        };

        let request = CreateNodeRequest {
            // Filling the empty root slot reuses the designated root id.
            node_id: if parent.is_none() {
                state.info.root_node.clone()
            } else {
                None
            },
            family_tree: self.tree_id.clone(),
            user: user_id.clone(),
            parent_node: parent,
            gender: details.gender,
            birth_date: Some(birth_date),
            death_date,
            spouse,
            marriage_date,
        };

        if let Err(err) = self.api.create_node(&request).await {
            if created_placeholder {
                tracing::warn!(
                    user = %user_id,
                    "Node creation failed after placeholder user was created; orphan user left behind"
                );
            }
            return Err(err);
        }
        Ok(())
    }

    /// Submit the open edit form as a partial update. Empty date strings are
    /// normalized to "not set", never sent as empty strings.
    pub async fn submit_edit(
        &mut self,
        user_id: Option<String>,
        details: NodeDetails,
    ) -> Result<(), ClientError> {
        let FormState::EditNode { node_id } = &self.form else {
            return Err(ClientError::Validation("No edit form is open".to_string()));
        };
        let node_id = node_id.clone();

        let request = UpdateNodeRequest {
            user: user_id,
            gender: details.gender,
            birth_date: Some(require_date(&details.birth_date, "Birth date")?),
            death_date: normalize_date(&details.death_date)?,
            spouse: normalize_id(&details.spouse),
            marriage_date: normalize_date(&details.marriage_date)?,
        };

        let epoch = self.begin_mutation("edit node")?;
        let result = self
            .api
            .update_node(&node_id, &request)
            .await
            .map(|_updated| ());
        self.conclude(epoch, result, true).await
    }

    /// Submit the open spouse form as a single pairing request; the backend
    /// updates both nodes atomically.
    pub async fn submit_spouse(&mut self) -> Result<(), ClientError> {
        let FormState::AddSpouse {
            node_id,
            selected,
            marriage_date,
            ..
        } = &self.form
        else {
            return Err(ClientError::Validation(
                "No spouse form is open".to_string(),
            ));
        };
        let Some(second) = selected.clone() else {
            return Err(ClientError::Validation(
                "Select a spouse before submitting".to_string(),
            ));
        };
        let request = PairSpouseRequest {
            first_one_id: node_id.clone(),
            second_one_id: second,
            marriage_date: normalize_date(marriage_date)?,
        };

        let epoch = self.begin_mutation("pair spouse")?;
        let result = self.api.pair_spouse(&request).await;
        self.conclude(epoch, result, true).await
    }

    /// Delete a node. Soft delete while the person is live, force delete
    /// once tombstoned; the variant is chosen here, never asked of the user.
    pub async fn delete_node(&mut self, node_id: &str) -> Result<(), ClientError> {
        if !self.controls_for(node_id).delete {
            return Err(ClientError::NotPermitted(
                "You may not delete this person".to_string(),
            ));
        }
        let Some(person_is_live) = self
            .state
            .as_ref()
            .and_then(|s| s.store.get(node_id))
            .map(|n| matches!(n.person(), Person::Live(_)))
        else {
            return Err(ClientError::Validation("Node not found".to_string()));
        };

        let epoch = self.begin_mutation("delete node")?;
        let result = if person_is_live {
            self.api.delete_node(node_id).await
        } else {
            self.api.force_delete_node(node_id).await
        };
        self.conclude(epoch, result, false).await
    }

    // ---- Mutation plumbing ------------------------------------------------

    fn begin_mutation(&mut self, action: &str) -> Result<u64, ClientError> {
        if self.busy {
            return Err(ClientError::Busy(format!(
                "Cannot {}: another request is in flight",
                action
            )));
        }
        self.busy = true;
        Ok(self.epoch)
    }

    /// Complete a mutation: refetch on success (closing the form unless it
    /// was cancelled mid-flight), surface the error on failure with local
    /// state untouched.
    async fn conclude(
        &mut self,
        epoch: u64,
        result: Result<(), ClientError>,
        close_form: bool,
    ) -> Result<(), ClientError> {
        let outcome = match result {
            Ok(()) => match self.load().await {
                Ok(()) => {
                    if close_form {
                        if self.epoch == epoch {
                            self.form = FormState::Idle;
                        } else {
                            tracing::debug!(
                                "Form closed while mutation was in flight; leaving current form state"
                            );
                        }
                    }
                    Ok(())
                }
                Err(err) => Err(err),
            },
            Err(err) => {
                tracing::warn!(error = %err, "Mutation failed; view state unchanged");
                Err(err)
            }
        };
        self.busy = false;
        outcome
    }
}

/// Tree management: listing, creation and deletion of whole trees.
pub struct TreeDirectory {
    api: ApiClient,
}

impl TreeDirectory {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<TreeList, ClientError> {
        self.api.list_trees().await
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<TreeSummary, ClientError> {
        if name.trim().is_empty() {
            return Err(ClientError::Validation("Tree name is required".to_string()));
        }
        if description.trim().is_empty() {
            return Err(ClientError::Validation(
                "Tree description is required".to_string(),
            ));
        }
        self.api
            .create_tree(&CreateTreeRequest {
                name: name.trim().to_string(),
                description: description.trim().to_string(),
            })
            .await
    }

    pub async fn remove(&self, tree_id: &str) -> Result<(), ClientError> {
        self.api.delete_tree(tree_id).await
    }
}

/// Empty form inputs become `None`; anything else must be a YYYY-MM-DD date.
fn normalize_date(input: &str) -> Result<Option<String>, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ClientError::Validation(format!("Invalid date: {}", trimmed)))?;
    Ok(Some(trimmed.to_string()))
}

fn require_date(input: &str, field: &str) -> Result<String, ClientError> {
    normalize_date(input)?
        .ok_or_else(|| ClientError::Validation(format!("{} is required", field)))
}

/// Empty id fields become `None`.
fn normalize_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
