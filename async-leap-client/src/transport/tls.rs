// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! TLS connection establishment.
//!
//! LEAP requires TLSv1.2 with an optional client certificate pair.
//! Processors present server certificates that do not match the address
//! they are reached on, so three verification modes exist: full
//! verification against a pinned CA (`verify_tls`), chain-only pinning
//! that tolerates the hostname mismatch (`ca_chain` without `verify_tls`),
//! and no verification at all (the default).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName};
use tokio_rustls::rustls::{version, ClientConfig, RootCertStore};

use leap_core::LeapProtocol;
use leap_types::LeapError;

use crate::config::{SessionConfig, CONNECT_TIMEOUT};

/// The stock [`Connector`](super::Connector): TCP plus a TLSv1.2
/// handshake.
#[derive(Debug, Default)]
pub struct TlsConnector;

#[async_trait]
impl super::Connector for TlsConnector {
    async fn connect(&self, config: &SessionConfig) -> Result<LeapProtocol, LeapError> {
        let tls_config = client_tls_config(config)?;
        let connector = tokio_rustls::TlsConnector::from(Arc::new(tls_config));

        debug!("connecting to {}:{}", config.host, config.port);
        let stream = timeout(
            CONNECT_TIMEOUT,
            TcpStream::connect((config.host.as_str(), config.port)),
        )
        .await
        .map_err(|_| LeapError::Timeout)??;

        let server_name = ServerName::try_from(config.host.clone())
            .map_err(|_| LeapError::Validation(format!("invalid host name {}", config.host)))?;
        let stream = timeout(CONNECT_TIMEOUT, connector.connect(server_name, stream))
            .await
            .map_err(|_| LeapError::Timeout)??;
        debug!("connected to {}:{}", config.host, config.port);

        let (read, write) = tokio::io::split(stream);
        Ok(LeapProtocol::new(read, write))
    }
}

fn client_tls_config(config: &SessionConfig) -> Result<ClientConfig, LeapError> {
    let builder = ClientConfig::builder_with_protocol_versions(&[&version::TLS12]);

    let builder = if config.verify_tls {
        let ca_chain = config.ca_chain.as_ref().ok_or_else(|| {
            LeapError::Validation("verify_tls requires a ca_chain bundle".to_string())
        })?;
        builder.with_root_certificates(load_roots(ca_chain)?)
    } else if let Some(ca_chain) = &config.ca_chain {
        let verifier = verifiers::PinnedChain::new(load_roots(ca_chain)?)?;
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(verifier))
    } else {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(verifiers::NoVerification::new()))
    };

    match (&config.certfile, &config.keyfile) {
        (Some(certfile), Some(keyfile)) => builder
            .with_client_auth_cert(load_certs(certfile)?, load_key(keyfile)?)
            .map_err(|err| LeapError::TlsConfig(err.to_string())),
        _ => Ok(builder.with_no_client_auth()),
    }
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, LeapError> {
    let mut reader = BufReader::new(File::open(path)?);
    let certs = rustls_pemfile::certs(&mut reader).collect::<Result<Vec<_>, _>>()?;
    if certs.is_empty() {
        return Err(LeapError::TlsConfig(format!(
            "no certificates found in {}",
            path.display()
        )));
    }
    Ok(certs)
}

fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>, LeapError> {
    let mut reader = BufReader::new(File::open(path)?);
    rustls_pemfile::private_key(&mut reader)?
        .ok_or_else(|| LeapError::TlsConfig(format!("no private key found in {}", path.display())))
}

fn load_roots(path: &Path) -> Result<RootCertStore, LeapError> {
    let mut roots = RootCertStore::empty();
    for cert in load_certs(path)? {
        roots
            .add(cert)
            .map_err(|err| LeapError::TlsConfig(err.to_string()))?;
    }
    Ok(roots)
}

mod verifiers {
    use std::sync::Arc;

    use tokio_rustls::rustls::client::danger::{
        HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
    };
    use tokio_rustls::rustls::client::WebPkiServerVerifier;
    use tokio_rustls::rustls::crypto::{
        ring, verify_tls12_signature, verify_tls13_signature, CryptoProvider,
    };
    use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
    use tokio_rustls::rustls::{
        CertificateError, DigitallySignedStruct, Error, RootCertStore, SignatureScheme,
    };

    use leap_types::LeapError;

    /// Accepts any server certificate. Signatures are still checked so the
    /// handshake itself stays honest.
    #[derive(Debug)]
    pub(super) struct NoVerification(CryptoProvider);

    impl NoVerification {
        pub(super) fn new() -> Self {
            Self(ring::default_provider())
        }
    }

    impl ServerCertVerifier for NoVerification {
        fn verify_server_cert(
            &self,
            _end_entity: &CertificateDer<'_>,
            _intermediates: &[CertificateDer<'_>],
            _server_name: &ServerName<'_>,
            _ocsp_response: &[u8],
            _now: UnixTime,
        ) -> Result<ServerCertVerified, Error> {
            Ok(ServerCertVerified::assertion())
        }

        fn verify_tls12_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, Error> {
            verify_tls12_signature(message, cert, dss, &self.0.signature_verification_algorithms)
        }

        fn verify_tls13_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, Error> {
            verify_tls13_signature(message, cert, dss, &self.0.signature_verification_algorithms)
        }

        fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
            self.0
                .signature_verification_algorithms
                .supported_schemes()
        }
    }

    /// Verifies the certificate chain against the pinned roots but
    /// tolerates the hostname mismatch LEAP processors exhibit.
    #[derive(Debug)]
    pub(super) struct PinnedChain(Arc<WebPkiServerVerifier>);

    impl PinnedChain {
        pub(super) fn new(roots: RootCertStore) -> Result<Self, LeapError> {
            let verifier = WebPkiServerVerifier::builder(Arc::new(roots))
                .build()
                .map_err(|err| LeapError::TlsConfig(err.to_string()))?;
            Ok(Self(verifier))
        }
    }

    impl ServerCertVerifier for PinnedChain {
        fn verify_server_cert(
            &self,
            end_entity: &CertificateDer<'_>,
            intermediates: &[CertificateDer<'_>],
            server_name: &ServerName<'_>,
            ocsp_response: &[u8],
            now: UnixTime,
        ) -> Result<ServerCertVerified, Error> {
            match self.0.verify_server_cert(
                end_entity,
                intermediates,
                server_name,
                ocsp_response,
                now,
            ) {
                Err(Error::InvalidCertificate(
                    CertificateError::NotValidForName
                    | CertificateError::NotValidForNameContext { .. },
                )) => Ok(ServerCertVerified::assertion()),
                other => other,
            }
        }

        fn verify_tls12_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, Error> {
            self.0.verify_tls12_signature(message, cert, dss)
        }

        fn verify_tls13_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, Error> {
            self.0.verify_tls13_signature(message, cert, dss)
        }

        fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
            self.0.supported_verify_schemes()
        }
    }
}
