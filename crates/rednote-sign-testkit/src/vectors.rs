//! Golden vectors for the signing pipeline.
//!
//! Expected values were computed independently from the platform's
//! reference behaviour. A change in any of them means the server will
//! reject our signatures.

use rand::rngs::StdRng;
use rand::SeedableRng;

use rednote_sign_core::{Cookies, FrameNonce, HttpMethod, Payload, SigningContext};
use rednote_sign_fingerprint::Fingerprint;

/// Device id shared by the long-form vectors (56 bytes, so it truncates).
pub const VECTOR_A1: &str = "19a0f4c1b2e3d4c5b6a7980123456789abcdef0123456789abcdef01";

/// An `x-s` vector: fixed request and nonce, expected frame and header.
#[derive(Debug, Clone)]
pub struct XsVector {
    pub name: &'static str,
    pub method: HttpMethod,
    pub uri: &'static str,
    /// Compact JSON object; key order is significant.
    pub payload_json: &'static str,
    pub a1: &'static str,
    pub app_id: &'static str,
    pub timestamp_millis: u64,
    pub nonce: FrameNonce,
    pub expected_content: &'static str,
    /// Hex of the 124-byte frame before masking.
    pub expected_raw_frame: &'static str,
    pub expected_xs: &'static str,
}

impl XsVector {
    pub fn payload(&self) -> Payload {
        serde_json::from_str(self.payload_json).unwrap_or_default()
    }

    pub fn context(&self) -> SigningContext {
        SigningContext::new(
            self.method,
            self.uri,
            self.payload(),
            self.a1,
            self.app_id,
            self.timestamp_millis,
        )
        .unwrap_or_else(|e| panic!("vector {} has invalid credentials: {e}", self.name))
    }
}

/// An `x-s-common` vector: the b1 projection depends only on `x36` and
/// `x44`, so those two inputs pin the whole output.
#[derive(Debug, Clone)]
pub struct CommonVector {
    pub name: &'static str,
    pub a1: &'static str,
    pub history_length: &'static str,
    pub timestamp_millis: u64,
    pub expected_b1: &'static str,
    pub expected_crc: i32,
    pub expected_xs_common: &'static str,
}

impl CommonVector {
    pub fn cookies(&self) -> Cookies {
        [("a1", self.a1), ("xsecappid", "xhs-pc-web")].into_iter().collect()
    }

    /// A fingerprint whose b1-relevant fields match the vector.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut rng = StdRng::seed_from_u64(0);
        let mut fp = Fingerprint::generate(&self.cookies(), "ua", self.timestamp_millis, &mut rng);
        fp.history_length = self.history_length.to_string();
        fp
    }
}

/// All `x-s` vectors.
pub fn xs_vectors() -> Vec<XsVector> {
    vec![
        XsVector {
            name: "homefeed POST, long a1",
            method: HttpMethod::Post,
            uri: "/api/sns/web/v1/homefeed",
            payload_json: r#"{"num":30,"refresh_type":1}"#,
            a1: VECTOR_A1,
            app_id: "xhs-pc-web",
            timestamp_millis: 1_736_870_400_123,
            nonce: FrameNonce {
                seed: 123_456_789,
                time_offset_secs: 42,
                sequence: 17,
                window_props_len: 200,
            },
            expected_content: r#"/api/sns/web/v1/homefeed{"num":30,"refresh_type":1}"#,
            expected_raw_frame: "01000015cd5b0797128967960302026b6c8a659401000011000000c80000003300000025394b0cc429db8334\
3139613066346331623265336434633562366137393830313233343536373839616263646566303132333435\
36373839616263640a7868732d70632d776562010166f9416767c9b583635e0744fa8415",
            expected_xs: "XYS_2UQhPsHCH0c1Pjh9HjIj2erjwjQhyoPTqBPT49pjHjIj2eHjwjQgynEDJ74AHjIj2ePjwjQTJdPIPAZlg9Rc\
Lf4aLpSE2gS84pSwtFYi4rk3y/Y0cnE0PLQazAp7PLTx2rS3cfuUyLYt+FDFGfzmJMkha7qA8fMN4bm8+nptyDYG\
JnzgafqI4SYQ4sTmzfka89RVnb4daBD9498tPb8aarYDwbQxPDr9LBcIGDTLGAq6Ppm+/dY/y9kDyfp+anQE804s\
Jr+/yBz9tM+VPflszDT/Jfznnfl0yLLIaSQQyAmOarGROaHVHdWFH0ijHdF=",
        },
        XsVector {
            name: "bare GET, short a1, long app id",
            method: HttpMethod::Get,
            uri: "/p",
            payload_json: "{}",
            a1: "short-a1",
            app_id: "xhs-pc-web-extra",
            timestamp_millis: 1_700_000_000_000,
            nonce: FrameNonce {
                seed: 0,
                time_offset_secs: 5,
                sequence: 0,
                window_props_len: 255,
            },
            expected_content: "/p",
            expected_raw_frame: "01000000000000aa6ae7cd890302027854e5cf8b01000000000000ff00000002000000b86493d2ae255a0234\
73686f72742d6131000000000000000000000000000000000000000000000000000000000000000000000000\
00000000000000000a7868732d70632d776562010173f9416767c9b583635e0744fa8415",
            expected_xs: "XYS_2UQhPsHCH0c1Pjh9HjIj2erjwjQhyoPTqBPT49pjNnph4oQYHjIj2eHjwjQgynEDJ74AHjIj2ePjwjQTJdPI\
PAZlg9RcLf4CPLzT2fTr/eSMan+i4rk3+fROJA+OnLQazApnPLTx2BEzcfuUyfRt+FSnc0zIzUu68ApopobDLDz3\
nDRrcflhJLEL2rQAPdz12/8jyrDM8r+M4r+Fc08MnaRc8BVhqD8YygkHq7+ywBkpGfMY8LzjaDSH+FRFzrQ3JM4S\
anQE804sJr+/yBz9tM+VPflt+rT/Jfznnfl0yLLIaSQQyAmOarGROaHVHdWFH0ijHdF=",
        },
    ]
}

/// All `x-s-common` vectors.
pub fn common_vectors() -> Vec<CommonVector> {
    vec![
        CommonVector {
            name: "history 7, long a1",
            a1: VECTOR_A1,
            history_length: "7",
            timestamp_millis: 1_736_870_400_123,
            expected_b1: "I38rHdgsjopgIvesdVwgIC+oIELmBZ5e3VwXLgFTIxS3bqwErFeexd0ekncAzMFYnqthIhJeDBMDKutRI3KsYorW\
HPtGrbV0P9WfIi/eWc6eYqtyQApPI37ekmR6QL+5Ii6sdnoeSfqYHqwl2qt5B0DoIx+PGDi/sVtkIxdsxuwr4qti\
IhuaIE3e3LV0I3VTIC7e0utl2ADmsLveDSKsSPw5IEvsiVtJOqw8BuwfPpdeTFWOIx4TIiu6ZPwrPut5IvlaLbgs\
3qtxIxes1VwHIkumIkIyejgsY/WTge7eSqte/D7sDcpipedeYrDtIC6eDVw2IENsSqtlnlSuNjVtIvoekqt3cZ7s\
Vo4gIESyIEle+AFDI3EPKI8BIiWIZPwAIvGj4sesYINsxVwSIC7ef96e0fhPIive6WrS8qwUIE7s1f0s6WAeiVtw\
pjNeYuw9IvYczAdeduwCpnJsWVw8IxI2I38isqwZgVtI4LTjoAve6peeYqwxIvAeS0Os1DZiIi7sjbos3amyIv6s\
dqwaICmygVtxgVw4IE7sVVtFIiAsiqtSIENsdutSHuwPnVtdIxkhIvVr27lk2Ive1utCIEDtIkJeYut4bYRtn/0e\
jgI7Ih4s2uwfJPwSI35skqwWGD5s6WAs3phwIhos3fOs3utscPwaICJsWPw5IiJekeqLICKejd/sfPtUIx7sxuwD\
4BYaIhQgIv5s1M6e6gvsiLdedVtsIkYTI3ilJutpIxElIEvsxbr38W==",
            expected_crc: -191105588,
            expected_xs_common: "2UQAPsHC+aIjqArjwjHjNsQhPsHCH0rjNsQhPaHCH0c1Pjh9HjIj2eHjwjQgynEDJ74AHjIj2ePjwjQhyoPTqBPT\
49pjHjIj2ecjwjHFN0W9N0ZjNsQh+aHCH0rEG/mf+BPlG0QSP9cFGApj+fr7w/WIP/HA+eL9+AWEGnQ08BpfPerU\
PAcM+0qhwnbjG9zS80ZlHjIj2eGjwjHjNsQh+UHCHjHVHdWhH0ija/PhqDYD87+xJ7mdag8Sq9zn494QcUT6aLpP\
JLQy+nLApd4G/B4BprShLA+jqg4bqD8S8gYDPBp3Jf+m2DMBnnEl4BYQyrkSzrQ+zrTM4bQQPFTAnnRUpFYc4r4U\
GSGILeSg8DSkN9pgGA8SngbF2pbmqbmQPA4Sy9Ma+SbPtApQy/8A8BE68p+fqpSHqg4VPdbF+LHIzBRQ2sTczFzk\
N7+n4BTQ2BzA2op7q0zl4BSQyopYaLLA8/+Pp0mQPM8LaLP78/mM4BIUcLzTqFl98Lz/a7+/LoqMaLp9q9Sn4rkO\
qgqhcdp78SmI8BpLzS4OagWFprSk4/8yLo4ULopF+LS9JBbPGf4AP7bF2rSh8gPlpd4HanTMJLS3agSSyf4AnaRg\
pB4S+9p/qgzSNFc7qFz0qBSI8nzSngQr4rSe+fprpdqUaLpwqM+l4Bl1Jb+M/fkn4rS9J9p3qgcAGMi7qM86+B4Q\
zp+EaLpV8aTmzDzQPFpcaFDhcDSkpFSyLo4mag8oy0zA8g+8aLEA2b87LFSe+9pfw/8SPB8iLrSk4fL9p7Q/wob7\
pLSb+7Pl80mA+S4m8nSn4o4IyDESngp7wLS9nn+CcnzS8op7c7m1ad+gpdqhagYQPDDAwBSAqg4y8M8Fa/zPpBk6\
cg8S+dmS8pSl47YQ4DbSLAmOqAbrnfSQy/4AyfQ6qA+YJgSQ408A8ob7GLSeJgSdpdzh8M87+rSb+7+npdzBanSm\
q9Sl4b+QzLEA8opFLFYM4Mm1pdzDagY3yrS9pdHU+9l3PDS98/bM4r+QzLzFanTt8pSM4ezjnpQFJjuI8nkda/4Q\
yezAPdp78Dkc4M+QPApAy7b7pF4r+gP9pFbAP7mi4FSiJ7PA8DRAP7pFq9+c49bQcFkApMm7+LSkafp38gbPaL+N\
8nkDN7+fLozpagW7q7YM4FcFcSSYanYz8FS9+gPl//8S+f49q9SP8BpDpdzAanT8prDAynlt4gzIagYbJrSb4d+h\
GdHAwbqROaHVHdWEH0iTP/DlP/ZM+/WhNsQhP/Zjw0ZVHdWlPaHCHfE6qfMYJsQR",
        },
        CommonVector {
            name: "history 20, short a1",
            a1: "short-a1",
            history_length: "20",
            timestamp_millis: 1_700_000_000_000,
            expected_b1: "I38rHdgsjopgIvesdVwgIC+oIELmBZ5e3VwXLgFTIxS3bqwErFeexd0ekncAzMFYnqthIhJeSgRxqqwdIvAsWBch\
wPttgm46KUzxIh0s0LKsjqwny7DZIvosxbPjyZuAIhKeDa7sfjTTJqtR+qwApdpNICumNI8KzVwSICgekutHwqwD\
IEFqIE/sTIZiIxrMIvgedqwR+7pPzZNsdY3efqtAIkNe3VwgqqtpputxKzgs1WpeICVWIhQ0/PtQKVwAI3Z2omde\
iqwfICAeTVtrIE++IEmncfdejgzYroosfqwOZWoedLDDBogsjZpBIxKsdVtaIkvefqwRbMLIGf4BI37sxqtE/WOe\
x0l4IhQsIE8Kwn4iI3Yq8lEgIkLxBVwkICZV2d3ejIgs1uwRIvge0f0ejeuPIEve6MmDyuwuIiKeTf0sxm/e1Vt4\
LsJeWqwXIvRccAdeduwvp9gsDPwgIxQrIvkkoVwGzVw+4L4FBaNeipNeDVw0IvAs1s5skSIFIkosSr7sVnMEIv6s\
DqwrIC8BpVt1/PweIE7sDqwxIiNs3uw5IkvsdqtlwuwLoVtWIx4dICMe4gHA+INeiqtjIhrtIk0ejqwonYQzcaes\
DBVUIEMb+qtoyVtLICKsxPwk4lee1pOsiMmLIiAsx7osTutycPwqIC0efVtUIiNeTUuPICKeYo3eWVw5Ix3s1uwu\
JBYqIhI+I35sVL6eknJedsJsSVwNIkhvICS5/PwCICGhIEJskbZRwnV=",
            expected_crc: 75027989,
            expected_xs_common: "2UQAPsHC+aIjqArjwjHjNsQhPsHCH0rjNsQhPaHCH0c1Pjh9HjIj2eHjwjQgynEDJ74AHjIj2ePjwjQhyoPTqBPT\
49pjHjIj2ecjwjHFN0W9N0ZjNsQh+aHCHd+iJ7QFNnrlHjIj2eGjwjHjNsQh+UHCHjHVHdWhH0ija/PhqDYD87+x\
J7mdag8Sq9zn494QcUT6aLpPJLQy+nLApd4G/B4BprShLA+jqg4bqD8S8gYDPBp3Jf+m2DMBnnEl4BYQyrkSL94a\
2obl49zQ4DbApFQ0yo4c4ozdJ/c9aMpC2rSiPoPI/rTAydb7JdD7zbkQ4fRA2BQcydSy4LbQyrTSzBr7q98xpbzt\
qgzat7b7cgmDqrEQc7pT/DDha7kn4M+Qc94Sy7pFao4l4FzQzL8laLL6qMzQnfSQ2oQ+ag8d8nzl4MH3+7mc2Skw\
q9z8P9pfqgzmanTw8/+n494lqgzIqopF2rTC87Plp7mSaL+npFSiL/Z6LozzaM87cLDAn0Q6JnzSygb78DSecnpL\
pdzUaLL3tFSbJnE08fzSyf4CngQ6J7+fqg4OnS468nzPzrzsJ94AySkIcDSha7+DpdzYanT98n8l4MQj/LlQz9GF\
cDDA+7+hqgzbNM4O8gWIJezQybbAaLLha741+BSQPMSlwBlb8FS3/oYspd43aL+yp0QDP9pxan4APgp7LDS989LI\
80mSyfpMLrSb4fL9/nMr2gp74LSka9pL80mA2BF68/bn4ezPqFkSp7b7nrS9Lf+0cnzS8op74dZE87+rLo4dagYz\
qDS9y9T6pd4o2S87tAzP+r8sGLESygmw8Lzn4AmQ4DbAPgPMq9T/aL8Qy9RAL7H7qM81/LpQ408Azob7qDSewrQI\
pdclNMm78LSb+7+rqg4hanSwqA+M4ApQy78A8obFJo4M4Fl6pdzgagWF8rSe/nLF8FYmtFSw8nSl4BkQyoQFanVI\
8nkl49R1npbCG9bSqFzspSpQzLMjt7bFJ7Sn4rlQcFTA2bm7yAzV8nLlqrRAyLMT/rSkcg+h+9RApopF2n+c47bQ\
cAmS8S8FpLSk/fpLpgpcaL+N8pS6P9pgpdqMagWAqAbM47ptcSSlanYQtFDA+g+n/e8Sy9Et8nzAad+/pd4wanTi\
4DSeLAL6Lo4eaL+oyrSbad+3GSka49EnOaHVHdWEH0i7+/ZU+ADhwaIj2erIH0iINsQhP/rjwjQ1J7QTGnIjKc==",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_shapes() {
        for v in xs_vectors() {
            assert_eq!(v.expected_raw_frame.len(), 248, "{}", v.name);
            assert!(v.expected_xs.starts_with("XYS_"), "{}", v.name);
            assert_eq!(v.context().uri, v.uri);
        }
        for v in common_vectors() {
            assert_eq!(v.fingerprint().history_length, v.history_length);
            assert_eq!(v.cookies().get("a1"), Some(v.a1));
        }
    }
}
