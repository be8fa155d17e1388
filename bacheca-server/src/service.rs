//! MessageService: lettura del messaggio del giorno, ricerca di un director
//! e scrittura autorizzata.

use bacheca_core::{Capabilities, GroupId, GroupMessage, Member, MemberId, MessageBoard};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::directory::MembershipDirectory;
use crate::error::{AppError, ResultExt};
use crate::fetcher::RemoteFetcher;
use crate::store::{MessageStore, UpsertMessageParams};

/// Richiesta di modifica del messaggio da parte di un membro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMessageParams {
    pub group_id: GroupId,
    pub member_id: MemberId,
    pub text: String,
    pub source_url: Option<String>,
}

pub struct MessageService {
    store: MessageStore,
    directory: Arc<dyn MembershipDirectory>,
    fetcher: Arc<dyn RemoteFetcher>,
}

impl MessageService {
    pub fn new(
        store: MessageStore,
        directory: Arc<dyn MembershipDirectory>,
        fetcher: Arc<dyn RemoteFetcher>,
    ) -> Self {
        Self { store, directory, fetcher }
    }

    /// Messaggio corrente del gruppo. Nessuna autorizzazione richiesta.
    pub async fn get_message(&self, group_id: GroupId) -> Result<GroupMessage, AppError> {
        self.store.get(group_id).await
    }

    /// Primo membro del gruppo (in ordine di roster) con il ruolo director concesso.
    pub async fn find_authorized_editor(&self, group_id: GroupId) -> Result<Member, AppError> {
        // roster in ordine di member_id: il primo director trovato vince
        let members = self.directory.list_members_of(group_id).await?;
        for member in members {
            // ruoli revocati (granted = 0) non contano
            let roles = self.directory.list_roles(member.member_id).await?;
            if Capabilities::from_roles(&roles).is_director() {
                return Ok(member);
            }
        }
        Err(AppError::NotFound.context(format!("find authorized editor for group {}", group_id)))
    }

    /// Scarica il testo da `url`. Il risultato è solo un candidato per il messaggio.
    pub async fn fetch_message_from_url(
        &self,
        cancel: &CancellationToken,
        url: &str,
    ) -> Result<String, AppError> {
        let url = url.trim();
        let ctx = || format!("fetch message from {:?}", url);
        if url.is_empty() {
            return Err(AppError::Invalid.context(ctx()));
        }
        tracing::debug!(url, "fetching message");
        // errori di rete e timeout arrivano già come Upstream dal fetcher
        let resp = cancellable(cancel, self.fetcher.get(url)).await.with_context(ctx)?;
        // qualsiasi status >= 400 è un fallimento del server remoto
        if resp.status >= 400 {
            return Err(AppError::UnexpectedStatus(resp.status).context(ctx()));
        }
        // byte non UTF-8 sostituiti, spazi ai bordi rimossi
        let text = String::from_utf8_lossy(&resp.body).trim().to_string();
        // un corpo vuoto non è un messaggio valido
        if text.is_empty() {
            return Err(AppError::Invalid.context(ctx()));
        }
        Ok(text)
    }

    /// Verifica che il membro sia director del gruppo, scrive e rilegge il messaggio.
    /// Input non valido e mancata autorizzazione producono entrambi `Invalid`.
    pub async fn update_message(
        &self,
        cancel: &CancellationToken,
        arg: UpdateMessageParams,
    ) -> Result<GroupMessage, AppError> {
        let ctx = format!("update message group={} member={}", arg.group_id, arg.member_id);
        // l'intera sequenza (directory, scrittura, rilettura) è annullabile
        cancellable(cancel, self.authorize_and_write(arg)).await.context(ctx)
    }

    async fn authorize_and_write(&self, arg: UpdateMessageParams) -> Result<GroupMessage, AppError> {
        // validazione prima di qualsiasi accesso alla directory
        let text = arg.text.trim();
        if text.is_empty() || arg.group_id == 0 || arg.member_id == 0 {
            return Err(AppError::Invalid);
        }
        // membro sconosciuto: NotFound dalla directory, propagato così com'è
        let member = self.directory.get_member(arg.member_id).await?;
        if !member.belongs_to(arg.group_id) {
            tracing::warn!(group_id = arg.group_id, member_id = arg.member_id, "member does not belong to group");
            return Err(AppError::Invalid);
        }
        let roles = self.directory.list_roles(arg.member_id).await?;
        if !Capabilities::from_roles(&roles).is_director() {
            tracing::warn!(group_id = arg.group_id, member_id = arg.member_id, "member is not a director");
            return Err(AppError::Invalid);
        }
        let params = UpsertMessageParams {
            group_id: arg.group_id,
            text: text.to_string(),
            // URL vuoto o solo spazi = nessuna sorgente
            source_url: arg
                .source_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            updated_by: Some(arg.member_id),
        };
        self.store.upsert(&params).await?;
        // rilettura: si restituisce esattamente ciò che è stato persistito
        let stored = self.store.get(arg.group_id).await?;
        tracing::info!(group_id = arg.group_id, member_id = arg.member_id, "group message updated");
        Ok(stored)
    }

    /// Bacheca del gruppo: messaggio e director, dove `NotFound` significa semplicemente assente.
    pub async fn message_board(&self, group_id: GroupId) -> Result<MessageBoard, AppError> {
        // solo NotFound viene assorbito, gli altri errori risalgono
        let message = match self.get_message(group_id).await {
            Ok(m) => Some(m),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.context(format!("message board {}", group_id))),
        };
        let editor = match self.find_authorized_editor(group_id).await {
            Ok(m) => Some(m),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e.context(format!("message board {}", group_id))),
        };
        Ok(MessageBoard { group_id, message, editor })
    }
}

/// Esegue `fut` finché `cancel` non viene annullato; in quel caso il future viene droppato.
async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        res = fut => res,
    }
}
