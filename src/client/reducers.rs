//! Pure state transitions. Each slice reducer is a flat match over the
//! action; anything it does not recognize returns the prior slice unchanged.

use super::actions::{Action, AlertAction, AuthAction, PostAction, ProfileAction};
use super::state::{Alert, AppState, AuthState, PostsState, ProfileState, Route};

/// Root reducer: hands the action to every slice.
pub fn reduce(state: AppState, action: &Action) -> AppState {
    let AppState { auth, profile, posts, alerts, route } = state;
    AppState {
        auth: reduce_auth(auth, action),
        profile: reduce_profile(profile, action),
        posts: reduce_posts(posts, action),
        alerts: reduce_alerts(alerts, action),
        route: reduce_route(route, action),
    }
}

fn reduce_auth(state: AuthState, action: &Action) -> AuthState {
    let Action::Auth(auth) = action else {
        return state;
    };
    match auth {
        AuthAction::RegisterSuccess { token } | AuthAction::LoginSuccess { token } => AuthState {
            token: Some(token.clone()),
            is_authenticated: true,
            loading: false,
            ..state
        },
        AuthAction::UserLoaded(user) => AuthState {
            is_authenticated: true,
            loading: false,
            user: Some(user.clone()),
            ..state
        },
        AuthAction::RegisterFail
        | AuthAction::LoginFail
        | AuthAction::AuthError
        | AuthAction::Logout
        | AuthAction::AccountDeleted => AuthState {
            token: None,
            is_authenticated: false,
            loading: false,
            user: None,
        },
    }
}

fn reduce_profile(state: ProfileState, action: &Action) -> ProfileState {
    let Action::Profile(profile) = action else {
        return state;
    };
    match profile {
        ProfileAction::Loaded(p) | ProfileAction::Updated(p) => ProfileState {
            profile: Some(p.clone()),
            loading: false,
            ..state
        },
        ProfileAction::ListLoaded(list) => ProfileState {
            profiles: list.clone(),
            loading: false,
            ..state
        },
        ProfileAction::ReposLoaded(repos) => ProfileState {
            repos: repos.clone(),
            loading: false,
            ..state
        },
        ProfileAction::Cleared => ProfileState {
            profile: None,
            repos: Vec::new(),
            loading: false,
            ..state
        },
        ProfileAction::Error(err) => ProfileState {
            error: Some(err.clone()),
            loading: false,
            ..state
        },
    }
}

// The posts slice edits its list surgically, so this reducer works on an
// owned copy instead of rebuilding the struct per branch.
fn reduce_posts(state: PostsState, action: &Action) -> PostsState {
    let Action::Post(action) = action else {
        return state;
    };
    let mut next = state;
    next.loading = false;
    match action {
        PostAction::ListLoaded(list) => next.posts = list.clone(),
        PostAction::Loaded(p) => next.post = Some(p.clone()),
        PostAction::Created(p) => next.posts.insert(0, p.clone()),
        PostAction::Deleted(id) => next.posts.retain(|p| p.id != *id),
        PostAction::LikesUpdated { id, likes } => {
            if let Some(p) = next.posts.iter_mut().find(|p| p.id == *id) {
                p.likes = likes.clone();
            }
        }
        PostAction::CommentAdded(comments) | PostAction::CommentRemoved(comments) => {
            if let Some(p) = next.post.as_mut() {
                p.comments = comments.clone();
            }
        }
        PostAction::Error(err) => next.error = Some(err.clone()),
    }
    next
}

fn reduce_alerts(alerts: Vec<Alert>, action: &Action) -> Vec<Alert> {
    match action {
        Action::Alert(AlertAction::Set(alert)) => {
            let mut next = alerts;
            next.push(alert.clone());
            next
        }
        Action::Alert(AlertAction::Remove(id)) => {
            alerts.into_iter().filter(|a| a.id != *id).collect()
        }
        _ => alerts,
    }
}

fn reduce_route(route: Option<Route>, action: &Action) -> Option<Route> {
    match action {
        Action::Navigate(to) => Some(*to),
        _ => route,
    }
}
